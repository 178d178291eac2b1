//! Scripted in-memory transport for fetcher and collector tests.

use crate::transport::{PatientTransport, TransportResponse};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Page { ids: Vec<String>, total_pages: u32 },
    Status(u16),
    Body(String),
    Fault,
}

impl Reply {
    pub fn page(ids: &[&str], total_pages: u32) -> Self {
        Reply::Page {
            ids: ids.iter().map(|id| id.to_string()).collect(),
            total_pages,
        }
    }

    fn into_response(self, page: u32, limit: u32) -> ClientResult<TransportResponse> {
        match self {
            Reply::Page { ids, total_pages } => {
                let data: Vec<_> = ids
                    .iter()
                    .map(|id| {
                        json!({
                            "patient_id": id,
                            "age": 50,
                            "blood_pressure": "120/80",
                            "temperature": 98.6
                        })
                    })
                    .collect();
                let body = json!({
                    "data": data,
                    "pagination": {
                        "page": page,
                        "limit": limit,
                        "total": total_pages as usize * ids.len(),
                        "totalPages": total_pages,
                        "hasNext": page < total_pages,
                        "hasPrevious": page > 1
                    },
                    "metadata": { "version": "v1.0" }
                });
                Ok(TransportResponse::new(200, body.to_string()))
            }
            Reply::Status(status) => Ok(TransportResponse::new(status, "error")),
            Reply::Body(body) => Ok(TransportResponse::new(200, body)),
            Reply::Fault => Err(ClientError::Network {
                page,
                message: "connection reset".into(),
            }),
        }
    }
}

/// Replies are consumed per page in order; once a page's script runs out, the fallback for that
/// page (if any) is repeated, otherwise the request gets a 500.
#[derive(Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<u32, VecDeque<Reply>>>,
    fallbacks: Mutex<HashMap<u32, Reply>>,
    calls: Mutex<Vec<u32>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, page: u32, replies: Vec<Reply>) -> Self {
        self.scripts
            .lock()
            .expect("scripts lock")
            .insert(page, replies.into());
        self
    }

    pub fn always(self, page: u32, reply: Reply) -> Self {
        self.fallbacks
            .lock()
            .expect("fallbacks lock")
            .insert(page, reply);
        self
    }

    /// Pages requested so far, in request order.
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn calls_for(&self, page: u32) -> usize {
        self.calls().iter().filter(|p| **p == page).count()
    }
}

#[async_trait]
impl PatientTransport for ScriptedTransport {
    async fn fetch_page(&self, page: u32, limit: u32) -> ClientResult<TransportResponse> {
        self.calls.lock().expect("calls lock").push(page);

        let scripted = self
            .scripts
            .lock()
            .expect("scripts lock")
            .get_mut(&page)
            .and_then(VecDeque::pop_front);

        let reply = match scripted {
            Some(reply) => reply,
            None => self
                .fallbacks
                .lock()
                .expect("fallbacks lock")
                .get(&page)
                .cloned()
                .unwrap_or(Reply::Status(500)),
        };

        reply.into_response(page, limit)
    }
}
