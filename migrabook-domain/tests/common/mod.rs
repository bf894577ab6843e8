//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use migrabook_domain::{
    DnsAnswer, DnsQuery, DnsRecordType, DnsResponse, DomainError, DomainResult, Notification,
    Notifier,
};

/// Canned zone data: `(name, type)` → record values, or a failure.
#[derive(Default)]
pub struct FakeZone {
    records: HashMap<(String, DnsRecordType), Vec<String>>,
    failures: HashMap<(String, DnsRecordType), DomainError>,
}

impl FakeZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, record_type: DnsRecordType, data: &[&str]) -> Self {
        self.records.insert(
            (name.to_string(), record_type),
            data.iter().map(ToString::to_string).collect(),
        );
        self
    }

    pub fn failing(mut self, name: &str, record_type: DnsRecordType) -> Self {
        self.failures.insert(
            (name.to_string(), record_type),
            DomainError::Network(format!("connection refused for {name}")),
        );
        self
    }
}

#[async_trait]
impl DnsQuery for FakeZone {
    async fn query(&self, name: &str, record_type: DnsRecordType) -> DomainResult<DnsResponse> {
        let key = (name.to_string(), record_type);
        if let Some(err) = self.failures.get(&key) {
            return Err(err.clone());
        }
        let answer = self
            .records
            .get(&key)
            .map(|values| {
                values
                    .iter()
                    .map(|data| DnsAnswer {
                        name: format!("{name}."),
                        record_type: record_type.code(),
                        ttl: 3600,
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(DnsResponse { status: 0, answer })
    }
}

/// Notifier that keeps everything it receives.
#[derive(Default)]
pub struct CollectingNotifier {
    pub sent: Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    pub fn count(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or_default()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notification);
        }
    }
}
