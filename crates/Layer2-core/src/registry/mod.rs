//! Registry - capability별 팩토리

mod factory;

pub use factory::{BuildContext, Constructor, Factory};

use crate::capability::{Bot, Llm, Project, Server};

pub type LlmFactory = Factory<dyn Llm>;
pub type BotFactory = Factory<dyn Bot>;
pub type ProjectFactory = Factory<dyn Project>;
pub type ServerFactory = Factory<dyn Server>;
