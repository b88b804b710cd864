/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - payroll_entries: 永続化クライアント, identity: IdentityResolver, gate: AccessGate
 * - 起動時に一度だけ組み立てて各 handler に注入する (module レベルの singleton は使わない)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::pages::PageSettings;
use crate::repos::payroll_entry_repo::PayrollEntryRepo;
use crate::services::{gate::AccessGate, identity::IdentityResolver};

#[derive(Clone)]
pub struct AppState {
    pub payroll_entries: Arc<dyn PayrollEntryRepo>,
    pub identity: Arc<dyn IdentityResolver>,
    pub gate: Arc<AccessGate>,
    pub pages: Arc<PageSettings>,
}

impl AppState {
    pub fn new(
        payroll_entries: Arc<dyn PayrollEntryRepo>,
        identity: Arc<dyn IdentityResolver>,
        gate: Arc<AccessGate>,
        pages: Arc<PageSettings>,
    ) -> Self {
        Self {
            payroll_entries,
            identity,
            gate,
            pages,
        }
    }
}
