//! Sample action API served by the `gpt-api-server` binary
//!
//! Exercises all three registration shapes:
//! - `POST /sendmessage` echoes a message back (JSON in, JSON out)
//! - `POST /notes` stores a note (JSON in, status code out)
//! - `GET /notes` lists stored notes (JSON out)
//! - `GET /whoami` reports whether the caller sent a bearer token (JSON out)

use std::sync::Arc;

use application::{
    ApiInfo, ApplicationError, InEndpointDefinition, InOutEndpointDefinition,
    OutEndpointDefinition,
};
use axum::http::StatusCode;
use domain::{Credential, HttpVerb};
use infrastructure::{TypedSchema, ValidatedSchema};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use validator::Validate;

use crate::{error::ApiError, extract::ApiContext, gpt_api::GptApi};

/// A message exchanged with the action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Message {
    /// Free-form message text
    pub message: String,
}

/// A note the action should remember
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Note {
    /// Note text
    #[validate(length(min = 1, max = 2000))]
    pub text: String,

    /// Optional labels
    #[serde(default)]
    pub tags: Vec<String>,
}

/// All notes stored so far
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NoteList {
    pub notes: Vec<Note>,
}

/// What the server knows about the caller
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Identity {
    /// Whether a bearer token was sent
    pub authenticated: bool,

    /// Correlation id of this request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// In-memory note storage shared by the note handlers
#[derive(Debug, Clone, Default)]
pub struct NoteBook {
    notes: Arc<RwLock<Vec<Note>>>,
}

impl NoteBook {
    pub async fn add(&self, note: Note) {
        self.notes.write().await.push(note);
    }

    pub async fn list(&self) -> NoteList {
        NoteList {
            notes: self.notes.read().await.clone(),
        }
    }
}

async fn send_message(
    _context: ApiContext,
    request: Message,
    _credential: Option<Credential>,
) -> Result<Message, ApiError> {
    Ok(Message {
        message: format!("You sent: {}", request.message),
    })
}

async fn who_am_i(
    context: ApiContext,
    credential: Option<Credential>,
) -> Result<Identity, ApiError> {
    Ok(Identity {
        authenticated: credential.is_some(),
        request_id: context.request_id.map(|id| id.to_string()),
    })
}

/// Build the sample API
///
/// # Errors
///
/// Fails if a schema cannot be compiled or a route is rejected.
pub fn build_demo_api(info: ApiInfo) -> Result<GptApi, ApplicationError> {
    let mut api = GptApi::new(info);
    let notes = NoteBook::default();

    api.json_to_json(
        InOutEndpointDefinition {
            verb: HttpVerb::Post,
            path: "/sendmessage".to_string(),
            operation_id: "sendmessage".to_string(),
            desc: "Endpoint for submitting messages".to_string(),
            request_schema: TypedSchema::<Message>::new()?.describe("Data required by the action"),
            response_schema: TypedSchema::<Message>::new()?.describe("A result of the action"),
        },
        send_message,
    )?;

    let store = notes.clone();
    api.json_to_nothing(
        InEndpointDefinition {
            verb: HttpVerb::Post,
            path: "/notes".to_string(),
            operation_id: "addNote".to_string(),
            desc: "Store a note for later".to_string(),
            request_schema: ValidatedSchema::<Note>::new()?,
        },
        move |_context, note: Note, _credential| {
            let store = store.clone();
            async move {
                info!(tags = note.tags.len(), "Storing note");
                store.add(note).await;
                Ok::<_, ApiError>(StatusCode::CREATED)
            }
        },
    )?;

    api.nothing_to_json(
        OutEndpointDefinition {
            verb: HttpVerb::Get,
            path: "/notes".to_string(),
            operation_id: "listNotes".to_string(),
            desc: "List all stored notes".to_string(),
            response_schema: TypedSchema::<NoteList>::new()?.describe("Stored notes"),
        },
        move |_context, _credential| {
            let notes = notes.clone();
            async move { Ok::<_, ApiError>(notes.list().await) }
        },
    )?;

    api.nothing_to_json(
        OutEndpointDefinition {
            verb: HttpVerb::Get,
            path: "/whoami".to_string(),
            operation_id: "whoami".to_string(),
            desc: "Report whether the caller is authenticated".to_string(),
            response_schema: TypedSchema::<Identity>::new()?,
        },
        who_am_i,
    )?;

    Ok(api)
}
