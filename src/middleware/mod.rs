/*
 * Responsibility
 * - middleware の公開インターフェース
 * - gate (edge check), cors, http (request-id / trace / limits), security_headers
 */
pub mod cors;
pub mod gate;
pub mod http;
pub mod security_headers;
