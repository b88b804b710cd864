/*!
 * Principal extractor
 *
 * Responsibility:
 * - gate middleware が request extensions に入れた Principal を handler に渡す
 */

mod current_principal;

pub use current_principal::CurrentPrincipal;
