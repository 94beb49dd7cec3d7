//! HTTP gateway: JSON request/response contract over the match engine.
//!
//! Field names are camelCase. The `lobbyId`/`playerId` names used by the
//! original browser client are accepted as aliases.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, instrument, warn};
use word_duel_core::{ErrorKind, MatchEngine, MatchError, Phase, SlotIndex, StateView, closest};

/// Sentinel reported for `lastGuessedLetter` before anyone has guessed.
pub const NO_LETTER: &str = "-";

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    engine: MatchEngine,
}

/// Builds the gateway router over `engine`.
#[instrument(skip(engine))]
pub fn router(engine: MatchEngine) -> Router {
    info!("Building HTTP routes");
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/healthz", get(health))
        .route("/create-lobby", post(create_lobby))
        .route("/join-lobby", post(join_lobby))
        .route("/submit-words", post(submit_words))
        .route("/guess", post(guess))
        .route("/guess-state", get(guess_state))
        .route("/check-word", get(check_word))
        .route("/suggest", get(suggest))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(AppState { engine })
}

// ─────────────────────────────────────────────────────────────
//  Requests and responses
// ─────────────────────────────────────────────────────────────

/// Response to creating a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLobbyResponse {
    /// Lobby code of the new match.
    pub match_id: String,
}

/// Request to join a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinLobbyRequest {
    /// Lobby code.
    #[serde(alias = "lobbyId")]
    pub match_id: String,
    /// Display name.
    pub player_name: String,
}

/// Response to a successful join.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinLobbyResponse {
    /// Slot assigned to the new player.
    pub slot_index: SlotIndex,
}

/// Request to commit secret words.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitWordsRequest {
    /// Lobby code.
    #[serde(alias = "lobbyId")]
    pub match_id: String,
    /// Committing player.
    #[serde(alias = "playerId")]
    pub slot_index: SlotIndex,
    /// Exactly five words.
    pub words: Vec<String>,
}

/// Acknowledgement of committed words.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitWordsResponse {
    /// Always `true` on success.
    pub ok: bool,
    /// Always `"ok"` on success.
    pub status: String,
}

/// Request to guess a word.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessRequest {
    /// Lobby code.
    #[serde(alias = "lobbyId")]
    pub match_id: String,
    /// Guessing player.
    #[serde(alias = "playerId")]
    pub slot_index: SlotIndex,
    /// The guess.
    pub word: String,
}

/// Outcome of a guess.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResponse {
    /// Whether the guess removed one of the opponent's words.
    pub correct: bool,
    /// Slot that guesses next.
    pub next_turn: SlotIndex,
    /// Whether the match ended.
    pub game_over: bool,
    /// Winner, if the match ended.
    pub winner: Option<SlotIndex>,
}

/// Query for the polled state view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateQuery {
    /// Lobby code.
    #[serde(alias = "lobbyId")]
    pub match_id: String,
    /// Requesting player. Without one only the shared fields are reported.
    #[serde(default, alias = "playerId")]
    pub slot_index: Option<SlotIndex>,
}

/// Polled state view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    /// Lobby code.
    pub match_id: String,
    /// Match phase.
    pub phase: Phase,
    /// Slot allowed to guess next.
    pub turn: SlotIndex,
    /// Last letter of the latest guess, or `"-"`.
    pub last_guessed_letter: String,
    /// Number of joined players.
    pub players_ready: usize,
    /// Number of players with committed words.
    pub players_committed: usize,
    /// Requester's guesses.
    pub your_guesses: Vec<String>,
    /// Opponent's guesses.
    pub opponent_guesses: Vec<String>,
    /// Requester's remaining secret words.
    pub remaining_words: Option<usize>,
    /// Opponent's remaining secret words.
    pub opponent_remaining: Option<usize>,
    /// Opponent's display name.
    pub opponent_name: Option<String>,
    /// Winner, once the match has ended.
    pub winner: Option<SlotIndex>,
}

impl From<StateView> for StateResponse {
    fn from(view: StateView) -> Self {
        Self {
            match_id: view.match_id().clone(),
            phase: *view.phase(),
            turn: *view.turn(),
            last_guessed_letter: view
                .last_guessed_letter()
                .map(String::from)
                .unwrap_or_else(|| NO_LETTER.to_string()),
            players_ready: *view.players_ready(),
            players_committed: *view.players_committed(),
            your_guesses: view.your_guesses().clone(),
            opponent_guesses: view.opponent_guesses().clone(),
            remaining_words: *view.remaining_words(),
            opponent_remaining: *view.opponent_remaining(),
            opponent_name: view.opponent_name().clone(),
            winner: *view.winner(),
        }
    }
}

/// Query carrying a single word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordQuery {
    /// Word typed by the user.
    pub word: String,
}

/// Lexicon membership answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckWordResponse {
    /// Word as received.
    pub word: String,
    /// Whether the word is in the lexicon.
    pub valid: bool,
}

/// Closest-word answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    /// Word as received.
    pub word: String,
    /// Closest lexicon word, if any.
    pub suggestion: Option<String>,
}

/// Error body returned for every failed operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable reason code.
    pub error: String,
    /// Error category.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Reason code for request bodies or query strings that fail to decode.
pub const MALFORMED_REQUEST: &str = "malformed_request";

/// Failure rendered as an HTTP response with an [`ErrorBody`].
#[derive(Debug)]
pub enum ApiError {
    /// The match engine rejected the operation.
    Match(MatchError),
    /// The request could not be decoded.
    Malformed(String),
}

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self {
        Self::Match(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed(rejection.body_text())
    }
}

impl ApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Match(err) => err.kind(),
            ApiError::Malformed(_) => ErrorKind::Validation,
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            ApiError::Match(err) => err.reason(),
            ApiError::Malformed(_) => MALFORMED_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Match(err) => err.to_string(),
            ApiError::Malformed(detail) => detail.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::StateConflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            error: self.reason().to_string(),
            kind,
            message: self.message(),
        };

        if kind == ErrorKind::Internal {
            error!(error = %body.message, "Internal match error");
        } else {
            warn!(
                reason = %body.error,
                error = %body.message,
                status = %status,
                "Request rejected"
            );
        }

        (status, Json(body)).into_response()
    }
}

// ─────────────────────────────────────────────────────────────
//  Handlers
// ─────────────────────────────────────────────────────────────

async fn health() -> &'static str {
    "ok"
}

#[instrument(skip(state))]
async fn create_lobby(State(state): State<AppState>) -> Json<CreateLobbyResponse> {
    let match_id = state.engine.create_match();
    Json(CreateLobbyResponse { match_id })
}

#[instrument(skip(state))]
async fn join_lobby(
    State(state): State<AppState>,
    payload: Result<Json<JoinLobbyRequest>, JsonRejection>,
) -> Result<Json<JoinLobbyResponse>, ApiError> {
    let Json(req) = payload?;
    let slot_index = state.engine.join(&req.match_id, &req.player_name)?;
    Ok(Json(JoinLobbyResponse { slot_index }))
}

#[instrument(skip(state, payload))]
async fn submit_words(
    State(state): State<AppState>,
    payload: Result<Json<SubmitWordsRequest>, JsonRejection>,
) -> Result<Json<SubmitWordsResponse>, ApiError> {
    let Json(req) = payload?;
    debug!(match_id = %req.match_id, slot = req.slot_index, "Submitting words");
    state
        .engine
        .commit_words(&req.match_id, req.slot_index, &req.words)?;
    Ok(Json(SubmitWordsResponse {
        ok: true,
        status: "ok".to_string(),
    }))
}

#[instrument(skip(state))]
async fn guess(
    State(state): State<AppState>,
    payload: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Json<GuessResponse>, ApiError> {
    let Json(req) = payload?;
    let result = state
        .engine
        .guess(&req.match_id, req.slot_index, &req.word)?;
    Ok(Json(GuessResponse {
        correct: *result.correct(),
        next_turn: *result.next_turn(),
        game_over: *result.game_over(),
        winner: *result.winner(),
    }))
}

#[instrument(skip(state))]
async fn guess_state(
    State(state): State<AppState>,
    query: Result<Query<StateQuery>, QueryRejection>,
) -> Result<Json<StateResponse>, ApiError> {
    let Query(query) = query?;
    let view = state.engine.query_state(&query.match_id, query.slot_index)?;
    Ok(Json(view.into()))
}

#[instrument(skip(state))]
async fn check_word(
    State(state): State<AppState>,
    query: Result<Query<WordQuery>, QueryRejection>,
) -> Result<Json<CheckWordResponse>, ApiError> {
    let Query(query) = query?;
    let valid = state.engine.lexicon().contains(&query.word);
    Ok(Json(CheckWordResponse {
        word: query.word,
        valid,
    }))
}

#[instrument(skip(state))]
async fn suggest(
    State(state): State<AppState>,
    query: Result<Query<WordQuery>, QueryRejection>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let Query(query) = query?;
    let suggestion = closest(state.engine.lexicon(), &query.word).map(String::from);
    Ok(Json(SuggestResponse {
        word: query.word,
        suggestion,
    }))
}
