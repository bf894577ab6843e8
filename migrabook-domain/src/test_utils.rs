//! 测试辅助模块
//!
//! Scripted DNS answers and a notifier that remembers what it was told.

#![allow(clippy::panic)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::doh::DnsQuery;
use crate::error::{DomainError, DomainResult};
use crate::notifier::{Notification, Notifier};
use crate::types::{DnsAnswer, DnsRecordType, DnsResponse};

// ===== MockDnsQuery =====

/// Answers from a table keyed by `(name, type)`; unknown questions get an
/// empty NOERROR response.
pub struct MockDnsQuery {
    responses: RwLock<HashMap<(String, DnsRecordType), DomainResult<DnsResponse>>>,
    /// 查询记录（按顺序）
    log: RwLock<Vec<(String, DnsRecordType)>>,
    /// 如果 Some，所有查询都 panic（用于测试 verifier 的兜底路径）
    panic_message: RwLock<Option<String>>,
}

impl MockDnsQuery {
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            log: RwLock::new(Vec::new()),
            panic_message: RwLock::new(None),
        }
    }

    pub async fn answer(&self, name: &str, record_type: DnsRecordType, data: &[&str]) {
        let answer = data
            .iter()
            .map(|d| DnsAnswer {
                name: format!("{name}."),
                record_type: record_type.code(),
                ttl: 300,
                data: (*d).to_string(),
            })
            .collect();
        self.responses.write().await.insert(
            (name.to_string(), record_type),
            Ok(DnsResponse { status: 0, answer }),
        );
    }

    pub async fn fail(&self, name: &str, record_type: DnsRecordType, error: DomainError) {
        self.responses
            .write()
            .await
            .insert((name.to_string(), record_type), Err(error));
    }

    pub async fn panic_on_query(&self, message: &str) {
        *self.panic_message.write().await = Some(message.to_string());
    }

    pub async fn queried_names(&self) -> Vec<String> {
        self.log.read().await.iter().map(|(n, _)| n.clone()).collect()
    }

    pub async fn query_count(&self) -> usize {
        self.log.read().await.len()
    }
}

#[async_trait]
impl DnsQuery for MockDnsQuery {
    async fn query(&self, name: &str, record_type: DnsRecordType) -> DomainResult<DnsResponse> {
        self.log.write().await.push((name.to_string(), record_type));
        if let Some(message) = self.panic_message.read().await.clone() {
            panic!("{message}");
        }
        self.responses
            .read()
            .await
            .get(&(name.to_string(), record_type))
            .cloned()
            .unwrap_or_else(|| Ok(DnsResponse::default()))
    }
}

// ===== RecordingNotifier =====

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut n) = self.notifications.lock() {
            n.push(notification);
        }
    }
}
