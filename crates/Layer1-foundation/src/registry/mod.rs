//! Registry - 타입 이름 등록/관리
//!
//! - `category.rs` - Capability 분류 (bot, llm, project, server)
//! - `types.rs` - 분류별로 열린 타입 이름 집합 (등록 순서 유지)

mod category;
mod types;

pub use category::Category;
pub use types::TypeRegistry;
