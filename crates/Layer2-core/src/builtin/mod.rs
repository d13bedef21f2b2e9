//! 기본 제공 플러그인
//!
//! 등록 순서가 곧 대화형 프롬프트의 기본값입니다:
//!
//! | 분류 | 이름 (등록 순서) |
//! |------|-----------------|
//! | llm | `gpt-3.5-turbo`, `echo` |
//! | bot | `baby-quill`, `simple` |
//! | project | `static-website`, `noop` |
//! | server | `static-website-server`, `null` |

pub mod bot;
pub mod llm;
pub mod project;
pub mod server;

pub use bot::{BabyQuill, SimpleBot};
pub use llm::{EchoLlm, OpenAiLlm};
pub use project::{NoopProject, StaticWebsite};
pub use server::{NullServer, StaticWebsiteServer};

use crate::Quill;
use quill_foundation::Result;

/// 기본 플러그인 전체 등록
pub fn register_all(quill: &Quill) -> Result<()> {
    quill.llms().register(llm::GPT_3_5_TURBO, OpenAiLlm::create)?;
    quill.llms().register(llm::ECHO, EchoLlm::create)?;

    quill.bots().register(bot::BABY_QUILL, BabyQuill::create)?;
    quill.bots().register(bot::SIMPLE, SimpleBot::create)?;

    quill.projects().register(project::STATIC_WEBSITE, StaticWebsite::create)?;
    quill.projects().register(project::NOOP, NoopProject::create)?;

    quill
        .servers()
        .register(server::STATIC_WEBSITE_SERVER, StaticWebsiteServer::create)?;
    quill.servers().register(server::NULL, NullServer::create)?;

    Ok(())
}
