//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::dashboard::{AdminOverview, LeaderboardEntry, LeaderboardKey, StudentOverview};
use crate::domain::{PanelKind, Problem, ProblemStatus, Role, Solution, User};
use crate::workspace::{TraceStep, Workspace};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    /// The SPA's mount effect: read the persisted blob once.
    Restore,
    Login {
        role: Role,
    },
    Logout,
    SetTab {
        tab: String,
    },
    OpenProblem {
        #[serde(rename = "problemId")]
        problem_id: String,
    },
    CloseWorkspace,
    SwitchSolution {
        #[serde(rename = "solutionId")]
        solution_id: String,
    },
    EditSolution {
        code: String,
    },
    ForkSolution,
    SetPanel {
        panel: PanelKind,
    },
    /// Kind stays a plain string on the wire so unrecognized values flow to
    /// the fallback path instead of failing to parse.
    RequestAssist {
        kind: String,
    },
    SubmitCode {
        code: String,
    },
    GenerateResume,
    ReviewProject {
        name: String,
        #[serde(rename = "techStack")]
        tech_stack: String,
        description: String,
    },
    GetProblems,
    GetOverview,
    GetLeaderboard {
        key: LeaderboardKey,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    /// Full session snapshot: sent after restore/login/logout/tab/submit.
    Session {
        session: SessionOut,
    },
    /// Full workspace snapshot: sent after every workspace mutation.
    Workspace {
        workspace: WorkspaceOut,
    },
    /// The workspace closed (explicit close or successful submission).
    WorkspaceClosed {
        awarded: bool,
    },
    Resume {
        text: String,
    },
    ProjectReview {
        text: String,
    },
    /// Catalog problems with the per-user derived status.
    Problems {
        problems: Vec<ProblemOut>,
    },
    StudentOverview {
        overview: StudentOverview,
    },
    AdminOverview {
        overview: AdminOverview,
    },
    Leaderboard {
        entries: Vec<LeaderboardEntry>,
    },
    Error {
        message: String,
    },
}

/// Session snapshot DTO.
#[derive(Debug, Serialize)]
pub struct SessionOut {
    pub user: Option<User>,
    #[serde(rename = "activeTab")]
    pub active_tab: String,
    #[serde(rename = "workspaceOpen")]
    pub workspace_open: bool,
}

/// Catalog problem plus the per-user derived status.
#[derive(Debug, Serialize)]
pub struct ProblemOut {
    #[serde(flatten)]
    pub problem: Problem,
    pub status: ProblemStatus,
}

/// Workspace snapshot DTO.
#[derive(Debug, Serialize)]
pub struct WorkspaceOut {
    pub problem: Problem,
    pub solutions: Vec<Solution>,
    #[serde(rename = "activeSolutionId")]
    pub active_solution_id: String,
    #[serde(rename = "activePanel")]
    pub active_panel: PanelKind,
    pub loading: bool,
    pub analysis: Option<String>,
    pub trace: Vec<TraceStep>,
}

/// Convert a catalog problem to the public DTO with its derived status.
pub fn problem_to_out(problem: &Problem, user: Option<&User>) -> ProblemOut {
    let status = user
        .map(|u| u.status_of(&problem.id))
        .unwrap_or(ProblemStatus::Unsolved);
    ProblemOut {
        problem: problem.clone(),
        status,
    }
}

/// Convert the internal workspace to the public snapshot.
pub fn workspace_to_out(ws: &Workspace) -> WorkspaceOut {
    WorkspaceOut {
        problem: ws.problem.clone(),
        solutions: ws.solutions().to_vec(),
        active_solution_id: ws.active_solution().id.clone(),
        active_panel: ws.active_panel,
        loading: ws.loading,
        analysis: ws.analysis.clone(),
        trace: ws.trace.clone(),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct ProblemsQuery {
    pub topic: Option<String>,
    pub week: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_parse_from_wire_json() {
        let msg: ClientWsMessage =
            serde_json::from_str(r#"{"type":"login","role":"STUDENT"}"#).expect("parse");
        assert!(matches!(msg, ClientWsMessage::Login { role: Role::Student }));

        let msg: ClientWsMessage =
            serde_json::from_str(r#"{"type":"open_problem","problemId":"p1"}"#).expect("parse");
        assert!(matches!(msg, ClientWsMessage::OpenProblem { problem_id } if problem_id == "p1"));

        // Unknown assist kinds still parse; resolution happens downstream.
        let msg: ClientWsMessage =
            serde_json::from_str(r#"{"type":"request_assist","kind":"unknown"}"#).expect("parse");
        assert!(matches!(msg, ClientWsMessage::RequestAssist { kind } if kind == "unknown"));
    }

    #[test]
    fn problem_status_rides_along_the_dto() {
        let problem = crate::catalog::seed_problems().remove(0);
        let user = crate::catalog::student_profile();
        let out = problem_to_out(&problem, Some(&user));
        assert_eq!(out.status, ProblemStatus::Solved);
        let anon = problem_to_out(&problem, None);
        assert_eq!(anon.status, ProblemStatus::Unsolved);
    }
}
