//! Factory - 타입 이름 -> 생성자 매핑
//!
//! capability 하나당 팩토리 하나. 모든 팩토리는 `Quill`이 소유하며,
//! 이름 목록은 공유 `TypeRegistry`에 함께 등록됩니다 (등록 순서 = 기본값 순서).

use crate::quill::Quill;
use parking_lot::RwLock;
use quill_foundation::{Category, Error, QuillConfig, Result, TypeRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// BuildContext / Constructor
// ============================================================================

/// 생성자에 전달되는 컨텍스트
///
/// `quill`을 통해 하위 capability(Bot, Server, LLM)를 같은 설정으로 만들 수 있습니다.
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    pub config: &'a QuillConfig,
    pub quill: &'a Quill,
}

impl<'a> BuildContext<'a> {
    pub fn new(config: &'a QuillConfig, quill: &'a Quill) -> Self {
        Self { config, quill }
    }
}

/// 등록된 생성자
pub type Constructor<T> = Arc<dyn Fn(&BuildContext<'_>) -> Result<Box<T>> + Send + Sync>;

// ============================================================================
// Factory<T>
// ============================================================================

/// capability 팩토리
pub struct Factory<T: ?Sized> {
    category: Category,

    /// 공유 타입 이름 레지스트리
    types: Arc<TypeRegistry>,

    /// 이름 -> 생성자
    constructors: RwLock<HashMap<String, Constructor<T>>>,
}

impl<T: ?Sized> Factory<T> {
    pub fn new(category: Category, types: Arc<TypeRegistry>) -> Self {
        Self {
            category,
            types,
            constructors: RwLock::new(HashMap::new()),
        }
    }

    // ========================================================================
    // 등록
    // ========================================================================

    /// 생성자 등록
    ///
    /// 같은 이름이 이미 있으면 `DuplicateType`으로 거부합니다.
    pub fn register<F>(&self, name: impl Into<String>, constructor: F) -> Result<()>
    where
        F: Fn(&BuildContext<'_>) -> Result<Box<T>> + Send + Sync + 'static,
    {
        self.insert(name.into(), Arc::new(constructor))
    }

    /// 기존 타입의 생성자를 새 이름으로 등록
    pub fn alias(&self, name: impl Into<String>, existing: &str) -> Result<()> {
        let constructor = self.constructor(existing)?;
        let name = name.into();
        debug!(category = %self.category, name = %name, target_type = %existing, "Registering alias");
        self.insert(name, constructor)
    }

    fn insert(&self, name: String, constructor: Constructor<T>) -> Result<()> {
        let mut constructors = self.constructors.write();
        if constructors.contains_key(&name) {
            return Err(Error::duplicate_type(self.category, name));
        }

        // 이름 검증/중복 검사는 TypeRegistry가 담당
        self.types.register(self.category, name.clone())?;
        constructors.insert(name, constructor);
        Ok(())
    }

    // ========================================================================
    // 조회 / 생성
    // ========================================================================

    /// 생성자가 등록되어 있는지 확인
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.read().contains_key(name)
    }

    /// 등록된 이름 (등록 순서)
    pub fn names(&self) -> Vec<String> {
        let constructors = self.constructors.read();
        self.types
            .list_values(self.category)
            .into_iter()
            .filter(|name| constructors.contains_key(name))
            .collect()
    }

    fn constructor(&self, name: &str) -> Result<Constructor<T>> {
        let found = self.constructors.read().get(name).cloned();
        found.ok_or_else(|| Error::unknown_type(self.category, name, self.names()))
    }

    /// 설정에 지정된 타입 이름으로 인스턴스 생성
    pub fn create(&self, ctx: &BuildContext<'_>) -> Result<Box<T>> {
        self.create_named(ctx.config.type_name(self.category), ctx)
    }

    /// 이름을 직접 지정해 인스턴스 생성
    ///
    /// 생성자는 락을 잡지 않은 상태에서 호출되므로 중첩 생성이 가능합니다.
    pub fn create_named(&self, name: &str, ctx: &BuildContext<'_>) -> Result<Box<T>> {
        let constructor = self.constructor(name)?;
        debug!(category = %self.category, name = %name, "Creating instance");
        constructor(ctx)
    }
}

impl<T: ?Sized> std::fmt::Debug for Factory<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("category", &self.category)
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct Fixed(&'static str);

    impl Greeter for Fixed {
        fn greet(&self) -> String {
            self.0.to_string()
        }
    }

    fn factory() -> (Arc<TypeRegistry>, Factory<dyn Greeter>) {
        let types = Arc::new(TypeRegistry::new());
        let factory = Factory::new(Category::Bot, types.clone());
        (types, factory)
    }

    fn config_for(bot: &str) -> QuillConfig {
        QuillConfig::new("site", "noop", bot, "echo", "null")
    }

    #[test]
    fn test_register_and_create() {
        let (types, factory) = factory();
        factory
            .register("hello", |_ctx: &BuildContext<'_>| {
                Ok(Box::new(Fixed("hello")) as Box<dyn Greeter>)
            })
            .unwrap();

        assert!(types.is_valid(Category::Bot, "hello"));
        assert!(factory.contains("hello"));

        let quill = Quill::new();
        let config = config_for("hello");
        let greeter = factory.create(&BuildContext::new(&config, &quill)).unwrap();
        assert_eq!(greeter.greet(), "hello");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let (_types, factory) = factory();
        factory
            .register("hello", |_ctx: &BuildContext<'_>| {
                Ok(Box::new(Fixed("first")) as Box<dyn Greeter>)
            })
            .unwrap();

        let err = factory
            .register("hello", |_ctx: &BuildContext<'_>| {
                Ok(Box::new(Fixed("second")) as Box<dyn Greeter>)
            })
            .unwrap_err();
        assert_eq!(err.kind(), "DuplicateTypeError");

        // 첫 등록이 유지됨
        let quill = Quill::new();
        let config = config_for("hello");
        let greeter = factory.create(&BuildContext::new(&config, &quill)).unwrap();
        assert_eq!(greeter.greet(), "first");
    }

    #[test]
    fn test_unknown_type_never_invokes_constructor() {
        let (_types, factory) = factory();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        factory
            .register("hello", move |_ctx: &BuildContext<'_>| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Box::new(Fixed("hello")) as Box<dyn Greeter>)
            })
            .unwrap();

        let quill = Quill::new();
        let config = config_for("Hello");
        let err = factory
            .create(&BuildContext::new(&config, &quill))
            .err()
            .unwrap();

        assert_eq!(err.kind(), "UnknownTypeError");
        let message = err.to_string();
        assert!(message.contains("bot"));
        assert!(message.contains("'Hello'"));
        assert!(message.contains("hello"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_alias() {
        let (types, factory) = factory();
        factory
            .register("hello", |_ctx: &BuildContext<'_>| {
                Ok(Box::new(Fixed("hello")) as Box<dyn Greeter>)
            })
            .unwrap();
        factory.alias("hi", "hello").unwrap();

        assert_eq!(types.list_values(Category::Bot), vec!["hello", "hi"]);
        assert_eq!(
            factory.alias("hi", "hello").unwrap_err().kind(),
            "DuplicateTypeError"
        );
        assert_eq!(
            factory.alias("hey", "missing").unwrap_err().kind(),
            "UnknownTypeError"
        );
        assert!(!types.is_valid(Category::Bot, "hey"));
    }

    #[test]
    fn test_names_in_registration_order() {
        let (_types, factory) = factory();
        for name in ["zeta", "alpha", "mid"] {
            factory
                .register(name, move |_ctx: &BuildContext<'_>| {
                    Ok(Box::new(Fixed(name)) as Box<dyn Greeter>)
                })
                .unwrap();
        }
        assert_eq!(factory.names(), vec!["zeta", "alpha", "mid"]);
    }
}
