// SPDX-License-Identifier: Apache-2.0

use serde_json::{json, Value};

use crate::ApiErrorCode;

fn error_ref(description: &str) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}
    })
}

/// Static description of every route the server registers.
#[must_use]
pub fn openapi_spec() -> Value {
    let codes: Vec<&str> = ApiErrorCode::ALL.iter().map(|c| c.as_str()).collect();
    json!({
      "openapi": "3.0.3",
      "info": {"title": "statusboard API", "version": crate::API_VERSION},
      "paths": {
        "/": {"get": {"responses": {"200": {"description": "kiosk page"}}}},
        "/admin": {"get": {"responses": {
          "200": {"description": "admin page"},
          "303": {"description": "redirect to /login without an admin session"}
        }}},
        "/api/set": {"post": {
          "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/StatusUpdate"}}}},
          "responses": {
            "200": {"description": "status updated"},
            "400": error_ref("invalid body"),
            "403": error_ref("not authorized")
          }
        }},
        "/healthz": {"get": {"responses": {"200": {"description": "ok"}}}},
        "/login": {
          "get": {"responses": {"200": {"description": "login form"}}},
          "post": {"responses": {
            "200": {"description": "login form with error"},
            "303": {"description": "redirect to /admin"},
            "429": {"description": "too many attempts"}
          }}
        },
        "/logout": {"get": {"responses": {"303": {"description": "redirect to /login"}}}},
        "/metrics": {"get": {"responses": {"200": {"description": "prometheus metrics"}}}},
        "/openapi.json": {"get": {"responses": {"200": {"description": "this document"}}}},
        "/readyz": {"get": {"responses": {
          "200": {"description": "ready"},
          "503": {"description": "storage unreadable"}
        }}},
        "/reply": {"post": {
          "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/ReplyRequest"}}}},
          "responses": {
            "200": {"description": "reply stored"},
            "400": error_ref("invalid body"),
            "403": error_ref("not authorized"),
            "404": error_ref("message not found")
          }
        }},
        "/status": {"get": {"responses": {
          "200": {"description": "board status", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/StatusResponse"}}}}
        }}},
        "/urgent": {
          "get": {"responses": {"200": {"description": "active urgent messages"}}},
          "post": {
            "requestBody": {"content": {"application/x-www-form-urlencoded": {"schema": {"$ref": "#/components/schemas/UrgentForm"}}}},
            "responses": {
              "200": {"description": "message accepted"},
              "400": error_ref("message required or invalid")
            }
          }
        }
      },
      "components": {
        "schemas": {
          "ApiError": {
            "type": "object",
            "required": ["code", "message", "details", "request_id"],
            "additionalProperties": false,
            "properties": {
              "code": {"$ref": "#/components/schemas/ApiErrorCode"},
              "details": {"type": "object"},
              "message": {"type": "string"},
              "request_id": {"type": "string"}
            }
          },
          "ApiErrorCode": {"type": "string", "enum": codes},
          "ReplyRequest": {
            "type": "object",
            "required": ["id"],
            "properties": {
              "id": {"oneOf": [{"type": "integer", "minimum": 0}, {"type": "string"}]},
              "text": {"type": "string"}
            }
          },
          "StatusResponse": {
            "type": "object",
            "required": ["status", "location", "note", "since", "server_time", "stale_after_min", "urgent"],
            "properties": {
              "location": {"type": "string"},
              "note": {"type": "string"},
              "server_time": {"type": "integer"},
              "since": {"type": "integer"},
              "stale_after_min": {"type": "integer"},
              "status": {"type": "string"},
              "urgent": {"nullable": true, "$ref": "#/components/schemas/UrgentMessage"}
            }
          },
          "StatusUpdate": {
            "type": "object",
            "properties": {
              "location": {"type": "string"},
              "note": {"type": "string"},
              "status": {"type": "string"}
            }
          },
          "UrgentForm": {
            "type": "object",
            "required": ["message"],
            "properties": {
              "designation": {"type": "string"},
              "message": {"type": "string"},
              "name": {"type": "string"},
              "reason": {"type": "string"}
            }
          },
          "UrgentMessage": {
            "type": "object",
            "required": ["id", "reason", "text", "name", "designation", "time", "reply"],
            "properties": {
              "designation": {"type": "string"},
              "id": {"type": "integer"},
              "name": {"type": "string"},
              "reason": {"type": "string"},
              "reply": {
                "nullable": true,
                "type": "object",
                "properties": {"text": {"type": "string"}, "time": {"type": "integer"}}
              },
              "text": {"type": "string"},
              "time": {"type": "integer"}
            }
          }
        }
      }
    })
}
