//! WebSocket upgrade + message loop. Each connection owns its `Session`;
//! client messages are parsed as JSON and dispatched to core logic. We
//! reply with a single JSON message per request.

use std::sync::Arc;

use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::dashboard::{admin_overview, leaderboard, student_overview};
use crate::domain::Role;
use crate::logic::*;
use crate::protocol::{workspace_to_out, ClientWsMessage, ServerWsMessage, SessionOut};
use crate::session::Session;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "ascope_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "ascope_backend", "WebSocket connected");

  // The per-connection session context: the only mutable state, owned here
  // and threaded explicitly through the handlers.
  let mut session = Session::new(state.store.clone());

  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "ascope_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state, &mut session).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "ascope_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => {
        let _ = socket.send(Message::Pong(payload)).await;
      }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "ascope_backend", "WebSocket disconnected");
}

fn session_snapshot(session: &Session) -> ServerWsMessage {
  ServerWsMessage::Session {
    session: SessionOut {
      user: session.user().cloned(),
      active_tab: session.active_tab().to_string(),
      workspace_open: session.workspace.is_some(),
    },
  }
}

fn workspace_snapshot(session: &Session) -> ServerWsMessage {
  match &session.workspace {
    Some(ws) => ServerWsMessage::Workspace { workspace: workspace_to_out(ws) },
    None => ServerWsMessage::Error { message: "No open workspace.".into() },
  }
}

#[instrument(level = "info", skip(state, session))]
async fn handle_client_ws(
  msg: ClientWsMessage,
  state: &AppState,
  session: &mut Session,
) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Restore => {
      session.restore();
      session_snapshot(session)
    }

    ClientWsMessage::Login { role } => {
      session.login(role);
      session_snapshot(session)
    }

    ClientWsMessage::Logout => {
      session.logout();
      session_snapshot(session)
    }

    ClientWsMessage::SetTab { tab } => {
      session.set_active_tab(&tab);
      session_snapshot(session)
    }

    ClientWsMessage::OpenProblem { problem_id } => match state.catalog.problem(&problem_id) {
      Some(problem) => {
        session.open_problem(problem.clone());
        workspace_snapshot(session)
      }
      None => ServerWsMessage::Error { message: format!("Unknown problemId: {}", problem_id) },
    },

    ClientWsMessage::CloseWorkspace => {
      session.close_workspace();
      ServerWsMessage::WorkspaceClosed { awarded: false }
    }

    ClientWsMessage::SwitchSolution { solution_id } => {
      if let Some(ws) = session.workspace.as_mut() {
        ws.switch_active(&solution_id);
      }
      workspace_snapshot(session)
    }

    ClientWsMessage::EditSolution { code } => {
      if let Some(ws) = session.workspace.as_mut() {
        ws.edit_active(code);
      }
      workspace_snapshot(session)
    }

    ClientWsMessage::ForkSolution => {
      if let Some(ws) = session.workspace.as_mut() {
        ws.fork();
      }
      workspace_snapshot(session)
    }

    ClientWsMessage::SetPanel { panel } => {
      if let Some(ws) = session.workspace.as_mut() {
        ws.set_panel(panel);
      }
      workspace_snapshot(session)
    }

    ClientWsMessage::RequestAssist { kind } => {
      run_workspace_assist(state, session, &kind).await;
      workspace_snapshot(session)
    }

    ClientWsMessage::SubmitCode { code } => match submit_code(session, code) {
      Some(awarded) => {
        info!(target: "session", %awarded, "WS submit_code handled");
        ServerWsMessage::WorkspaceClosed { awarded }
      }
      None => ServerWsMessage::Error { message: "No open workspace.".into() },
    },

    ClientWsMessage::GenerateResume => match generate_resume(state, session).await {
      Some(text) => ServerWsMessage::Resume { text },
      None => ServerWsMessage::Error { message: "Not logged in.".into() },
    },

    ClientWsMessage::ReviewProject { name, tech_stack, description } => {
      let text = review_project(state, name, tech_stack, description).await;
      ServerWsMessage::ProjectReview { text }
    }

    ClientWsMessage::GetProblems => ServerWsMessage::Problems {
      problems: problems_for(state, session),
    },

    ClientWsMessage::GetOverview => match session.user() {
      Some(user) if user.role == Role::Admin => ServerWsMessage::AdminOverview {
        overview: admin_overview(),
      },
      Some(user) => ServerWsMessage::StudentOverview {
        overview: student_overview(user, &state.catalog),
      },
      None => ServerWsMessage::Error { message: "Not logged in.".into() },
    },

    ClientWsMessage::GetLeaderboard { key } => match session.user() {
      Some(user) => ServerWsMessage::Leaderboard { entries: leaderboard(user, key) },
      None => ServerWsMessage::Error { message: "Not logged in.".into() },
    },
  }
}
