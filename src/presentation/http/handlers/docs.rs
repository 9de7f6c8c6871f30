//! API Documentation
//!
//! OpenAPI 3.0 document at `/api/docs/swagger.json` and a Swagger UI page
//! at `/api/docs`.

use axum::{extract::State, response::Html, Json};
use serde_json::{json, Value};

use crate::config::Settings;
use crate::startup::AppState;

/// Serve the OpenAPI document
pub async fn openapi_json(State(state): State<AppState>) -> Json<Value> {
    Json(openapi_document(&state.settings))
}

/// Serve the Swagger UI page
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Messaging API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({
        url: "/api/docs/swagger.json",
        dom_id: "#swagger-ui",
        persistAuthorization: true,
      });
    };
  </script>
</body>
</html>
"##;

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/Error" } }
        }
    })
}

fn header_param(name: &str, description: &str, required: bool) -> Value {
    json!({
        "in": "header",
        "name": name,
        "required": required,
        "description": description,
        "schema": { "type": "string" }
    })
}

fn not_implemented(summary: &str) -> Value {
    json!({
        "post": {
            "summary": summary,
            "tags": ["Auth"],
            "responses": { "501": error_response("Not implemented") }
        }
    })
}

/// Build the OpenAPI document for the running configuration
pub fn openapi_document(settings: &Settings) -> Value {
    let mut servers = vec![json!({
        "url": format!("http://localhost:{}", settings.server.port),
        "description": "Local server"
    })];
    if let Some(public_url) = settings.docs.public_url.as_deref().filter(|u| !u.is_empty()) {
        servers.push(json!({ "url": public_url, "description": "Public tunnel" }));
    }

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Messaging API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "API documentation for the messaging backend"
        },
        "servers": servers,
        "components": {
            "securitySchemes": {
                "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" }
            },
            "schemas": {
                "Error": {
                    "type": "object",
                    "properties": {
                        "code": { "type": "integer" },
                        "message": { "type": "string" },
                        "errors": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "field": { "type": "string" },
                                    "message": { "type": "string" }
                                }
                            }
                        }
                    }
                },
                "Message": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "chatId": { "type": "string" },
                        "senderId": { "type": "string" },
                        "content": { "type": "string" },
                        "createdAt": { "type": "string", "format": "date-time" }
                    }
                },
                "User": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "username": { "type": "string" },
                        "phone": { "type": "string" },
                        "email": { "type": "string", "nullable": true },
                        "profilePic": { "type": "string", "nullable": true },
                        "about": { "type": "string", "nullable": true },
                        "isOnline": { "type": "boolean" },
                        "lastSeen": { "type": "string", "format": "date-time" },
                        "createdAt": { "type": "string", "format": "date-time" }
                    }
                }
            }
        },
        "paths": {
            "/api/msgs": {
                "get": {
                    "summary": "Get messages of a chat (paginated)",
                    "description": "Newest first. Follow nextCursor until it is null.",
                    "tags": ["Messages"],
                    "parameters": [
                        header_param("id", "Chat ID", true),
                        header_param("userId", "Viewer user ID; enables the participant check", false),
                        {
                            "in": "query",
                            "name": "limit",
                            "description": "Number of messages to fetch (default 20, max 100)",
                            "schema": { "type": "integer" }
                        },
                        {
                            "in": "query",
                            "name": "cursor",
                            "description": "Message ID to continue pagination from",
                            "schema": { "type": "string" }
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "Messages retrieved successfully",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "messages": {
                                                "type": "array",
                                                "items": { "$ref": "#/components/schemas/Message" }
                                            },
                                            "nextCursor": { "type": "string", "nullable": true }
                                        }
                                    }
                                }
                            }
                        },
                        "400": error_response("Missing data"),
                        "403": error_response("User is not part of this chat"),
                        "404": error_response("Chat not found"),
                        "500": error_response("Server error")
                    }
                },
                "post": {
                    "summary": "Send a message to a chat",
                    "description": "Creates a new message and updates the sender's read status.",
                    "tags": ["Messages"],
                    "parameters": [
                        header_param("id", "Chat ID", true),
                        header_param("userId", "Sender user ID", true)
                    ],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "properties": { "text": { "type": "string", "example": "Hello world" } }
                                }
                            }
                        }
                    },
                    "responses": {
                        "201": {
                            "description": "Message sent successfully",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": { "msg": { "$ref": "#/components/schemas/Message" } }
                                    }
                                }
                            }
                        },
                        "400": error_response("Missing data"),
                        "403": error_response("User is not part of this chat"),
                        "404": error_response("Chat not found"),
                        "500": error_response("Server error")
                    }
                }
            },
            "/api/profile": {
                "put": {
                    "summary": "Update user profile",
                    "description": "Partial update: only provided fields are changed.",
                    "tags": ["Profile"],
                    "security": [{ "bearerAuth": [] }],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "username": { "type": "string" },
                                        "phone": { "type": "string" },
                                        "email": { "type": "string", "format": "email", "nullable": true },
                                        "profilePic": { "type": "string", "format": "uri", "nullable": true },
                                        "about": { "type": "string", "nullable": true },
                                        "isOnline": { "type": "boolean" },
                                        "lastSeen": { "type": "string", "format": "date-time" }
                                    }
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Profile updated successfully",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "message": { "type": "string" },
                                            "user": { "$ref": "#/components/schemas/User" }
                                        }
                                    }
                                }
                            }
                        },
                        "400": error_response("No data provided, invalid value or duplicate field"),
                        "401": error_response("Missing or invalid token"),
                        "500": error_response("Update failed")
                    }
                }
            },
            "/register": {
                "post": {
                    "summary": "Register a new user",
                    "tags": ["Auth"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "required": ["username", "phone", "password"],
                                    "properties": {
                                        "username": { "type": "string" },
                                        "phone": { "type": "string" },
                                        "password": { "type": "string", "format": "password" }
                                    }
                                }
                            }
                        }
                    },
                    "responses": {
                        "201": {
                            "description": "User created",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": { "user": { "$ref": "#/components/schemas/User" } }
                                    }
                                }
                            }
                        },
                        "400": error_response("Missing data or duplicate field")
                    }
                }
            },
            "/login": {
                "post": {
                    "summary": "Obtain a bearer token",
                    "tags": ["Auth"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "required": ["password"],
                                    "properties": {
                                        "username": { "type": "string" },
                                        "phone": { "type": "string" },
                                        "password": { "type": "string", "format": "password" }
                                    }
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Token issued",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "token": { "type": "string" },
                                            "tokenType": { "type": "string" },
                                            "expiresIn": { "type": "integer" },
                                            "user": { "$ref": "#/components/schemas/User" }
                                        }
                                    }
                                }
                            }
                        },
                        "400": error_response("Missing data"),
                        "401": error_response("Invalid credentials")
                    }
                }
            },
            "/verifyReg": not_implemented("Verify registration"),
            "/requestOtp": not_implemented("Request a one-time password"),
            "/verifyOtp": not_implemented("Verify a one-time password"),
            "/forgotPassword": not_implemented("Start password reset"),
            "/resetPassword": not_implemented("Complete password reset"),
            "/health": {
                "get": {
                    "summary": "Liveness and process summary",
                    "tags": ["Health"],
                    "responses": { "200": { "description": "Server is running" } }
                }
            }
        }
    })
}
