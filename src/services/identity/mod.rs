/*!
 * Identity resolution
 *
 * Responsibility:
 * - リクエストから認証済み主体 (Principal) を解決する
 * - 具体的な identity provider は IdentityResolver trait の裏に隠す
 *
 * Public API:
 * - Principal
 * - IdentityResolver / IdentityError
 * - JwtSessionResolver (署名付きセッショントークン)
 * - build_identity_resolver
 */

mod factory;
mod jwt_session;
mod resolver;
mod types;

pub use factory::build_identity_resolver;
pub use jwt_session::JwtSessionResolver;
pub use resolver::{IdentityError, IdentityResolver};
pub use types::Principal;
