//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 1005,
        "error": "INTERNAL_ERROR",
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "vendor": [{
                "code": "length",
                "message": null,
                "params": {"min": 1, "value": ""}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid ObjectId",
    content_type = "application/json",
    example = json!({
        "code": 1002,
        "error": "INVALID_OBJECT_ID",
        "message": "Invalid ObjectId format"
    })
)]
pub struct BadRequestObjectIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "Resource not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - Missing or invalid token",
    content_type = "application/json",
    example = json!({
        "code": 1006,
        "error": "UNAUTHORIZED",
        "message": "No token provided"
    })
)]
pub struct UnauthorizedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - Token is not authorized for this operation",
    content_type = "application/json",
    example = json!({
        "code": 1007,
        "error": "FORBIDDEN",
        "message": "Not authorized"
    })
)]
pub struct ForbiddenResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Resource already exists",
    content_type = "application/json",
    example = json!({
        "code": 1008,
        "error": "ALREADY_EXISTS",
        "message": "User already exists"
    })
)]
pub struct AlreadyExistsResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Payload Too Large - Request body exceeds 1 MiB",
    content_type = "application/json",
    example = json!({
        "code": 1012,
        "error": "PAYLOAD_TOO_LARGE",
        "message": "Request body too large"
    })
)]
pub struct PayloadTooLargeResponse(pub ErrorResponse);
