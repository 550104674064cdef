//! 行分隔 JSON 協定
//!
//! 每行一個請求，回一行回應：
//! `{"kind":"dispatch","session":"p1","action":{"type":"ADD_COINS","payload":3}}`
//! 未指定 session 時使用 `default`。

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::env::GameEnv;
use super::observation::{status_from_state, StatusView};
use super::store::{SaveSlot, Store};
use crate::game::{RentOutcome, RentSchedule, SpinResult, SymbolId, SAVE_KEY};

pub const DEFAULT_SESSION: &str = "default";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Request {
    Dispatch {
        #[serde(default)]
        session: Option<String>,
        action: Action,
    },
    Spin {
        #[serde(default)]
        session: Option<String>,
    },
    FinishSpin {
        #[serde(default)]
        session: Option<String>,
    },
    Status {
        #[serde(default)]
        session: Option<String>,
    },
    ShopOffer {
        #[serde(default)]
        session: Option<String>,
    },
}

impl Request {
    pub fn session(&self) -> &str {
        let session = match self {
            Request::Dispatch { session, .. }
            | Request::Spin { session }
            | Request::FinishSpin { session }
            | Request::Status { session }
            | Request::ShopOffer { session } => session,
        };
        session.as_deref().unwrap_or(DEFAULT_SESSION)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    State {
        status: StatusView,
        #[serde(skip_serializing_if = "Option::is_none")]
        outcome: Option<RentOutcome>,
    },
    Spin {
        status: StatusView,
        result: Option<SpinResult>,
    },
    Offer {
        status: StatusView,
        items: Vec<SymbolId>,
    },
    Error {
        message: String,
    },
}

/// session 對應的存檔 key
///
/// 英數與 `-` 以外的位元組一律編成 `%XX`，不同 session 不會對應到同一個檔名。
pub fn save_key(session: &str) -> String {
    if session == DEFAULT_SESSION {
        return SAVE_KEY.to_string();
    }

    let mut encoded = String::with_capacity(session.len());
    for byte in session.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    format!("{}:{}", SAVE_KEY, encoded)
}

// ============================================================================
// Session 管理
// ============================================================================

pub struct SessionRegistry {
    sessions: DashMap<String, GameEnv<Arc<dyn Store>>>,
    store: Arc<dyn Store>,
    schedule: RentSchedule,
    seed: Option<u64>,
}

impl SessionRegistry {
    pub fn new(store: Arc<dyn Store>, schedule: RentSchedule) -> Self {
        Self {
            sessions: DashMap::new(),
            store,
            schedule,
            seed: None,
        }
    }

    /// 所有新 session 使用固定種子
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// 處理單一請求；只持有該 session 的 entry
    pub fn handle(&self, request: Request) -> Response {
        let session = request.session().to_string();
        let mut env = self.sessions.entry(session.clone()).or_insert_with(|| {
            let slot = SaveSlot::new(Arc::clone(&self.store), save_key(&session));
            GameEnv::open(slot, self.schedule.clone(), self.seed)
        });

        match request {
            Request::Dispatch { action, .. } => match env.dispatch(&action) {
                Ok(outcome) => Response::State {
                    status: status_from_state(env.state()),
                    outcome,
                },
                Err(err) => {
                    log::warn!("session {} rejected {:?}: {}", session, action.tag(), err);
                    Response::Error {
                        message: err.to_string(),
                    }
                }
            },
            Request::Spin { .. } => match env.spin() {
                Ok(result) => Response::Spin {
                    status: status_from_state(env.state()),
                    result,
                },
                Err(err) => Response::Error {
                    message: err.to_string(),
                },
            },
            Request::FinishSpin { .. } => match env.finish_spin() {
                Ok(outcome) => Response::State {
                    status: status_from_state(env.state()),
                    outcome,
                },
                Err(err) => Response::Error {
                    message: err.to_string(),
                },
            },
            Request::Status { .. } => Response::State {
                status: status_from_state(env.state()),
                outcome: None,
            },
            Request::ShopOffer { .. } => {
                let items = env.shop_offer().to_vec();
                Response::Offer {
                    status: status_from_state(env.state()),
                    items,
                }
            }
        }
    }

    /// 解析一行請求並回傳一行 JSON 回應
    pub fn handle_line(&self, line: &str) -> String {
        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request),
            Err(err) => Response::Error {
                message: format!("bad request: {}", err),
            },
        };

        match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(err) => {
                log::error!("failed to encode response: {}", err);
                r#"{"kind":"error","message":"internal error"}"#.to_string()
            }
        }
    }
}
