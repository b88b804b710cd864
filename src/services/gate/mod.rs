/*!
 * Access gate
 *
 * Responsibility:
 * - 解決済みの Principal (または不在) から「続行 / リダイレクト」を決める
 * - 段 1: 認証済みか (常に有効)
 * - 段 2 以降: GateStage の連鎖 (先頭から順に評価し、最初の Redirect で打ち切る)
 *
 * Public API:
 * - AccessGate / GateDecision / GateStage / GateError
 * - BranchAssociationStage
 */

mod branch;
mod core;

pub use branch::BranchAssociationStage;
pub use self::core::{AccessGate, GateDecision, GateError, GateStage};
