/*
 * Responsibility
 * - 外部サービス (identity provider) と認可判定のロジックを束ねる
 * - handler / middleware からはここの trait 経由で使う
 */
pub mod gate;
pub mod identity;
