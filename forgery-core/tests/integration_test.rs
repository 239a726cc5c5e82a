//! Integration tests for forgery-core

use forgery_core::providers;
use forgery_core::*;
use regex::Regex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn test_locale() -> Locale {
    Locale::parse("test").unwrap()
}

fn test_store() -> LocaleStore {
    let mut store = LocaleStore::new();
    store
        .insert_json(
            &test_locale(),
            r##"{
                "property": {
                    "dummy": ["x", "y", "z"],
                    "simple": "hello",
                    "simpleResolution": "#{hello}",
                    "advancedResolution": "#{Superhero.name}",
                    "resolutionWithList": ["#{hello}"],
                    "multipleResolution": "#{hello} #{Superhero.descriptor}",
                    "regexify1": "#{regexify '[45]{2}'}",
                    "regexify_slash_format": "#{regexify '/[45]{2}/'}",
                    "regexify_cell": "#{regexify '4[57]9'}",
                    "bothify_2": "#{bothify '??##','true'}"
                }
            }"##,
        )
        .unwrap();
    store
        .insert_json(
            &Locale::en(),
            r#"{"name": {"first_name": ["Ada"]}, "id_number": {"invalid": "000-##-####"}}"#,
        )
        .unwrap();
    store
}

/// Counts calls to every stub operation.
#[derive(Default)]
struct Calls {
    hello: Arc<AtomicUsize>,
    superhero_name: Arc<AtomicUsize>,
    descriptor: Arc<AtomicUsize>,
}

impl Calls {
    fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

type StubResult = std::result::Result<String, OperationError>;

fn counted(
    counter: &Arc<AtomicUsize>,
    value: &'static str,
) -> impl Fn(&Invocation<'_>) -> StubResult + Send + Sync + 'static {
    let counter = counter.clone();
    move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(value.to_string())
    }
}

fn fixture(hello: &'static str) -> (Faker, Namespace, Calls) {
    let calls = Calls::default();

    let superhero = Namespace::new("Superhero")
        .operation("name", counted(&calls.superhero_name, "Luke Cage"))
        .operation("descriptor", counted(&calls.descriptor, "up up and away"));

    let name = Namespace::new("Name").operation("firstName", |_| Ok("John".to_string()));

    let number = Namespace::new("Number").operation("numberBetween", |call| {
        let low: i64 = call.args().parse(0)?;
        let high: i64 = call.args().parse(1)?;
        if low > high {
            return Err(OperationError::failed("low bound above high bound"));
        }
        Ok(low.to_string())
    });

    let registry = Registry::new()
        .with(superhero)
        .with(name)
        .with(number)
        .with(providers::id_number());

    let dummy = Namespace::new("DummyService")
        .operation("hello", counted(&calls.hello, hello))
        .operation("lastName", |_| Ok("Smith".to_string()));

    let faker = Faker::builder()
        .store(test_store())
        .random(FixedRandom::new(0))
        .registry(registry)
        .locale(test_locale())
        .build()
        .unwrap();

    (faker, dummy, calls)
}

fn expression_should_fail_with(expression: &str, message: &str) {
    let (faker, _, _) = fixture("Hello");
    let err = faker.expand(expression).unwrap_err();
    assert!(matches!(err, FakerError::UnresolvedDirective { .. }), "{err:?}");
    assert_eq!(err.to_string(), message);
}

#[test]
fn test_unparseable_locale_is_rejected() {
    assert!(matches!(
        Locale::parse("Does not exist"),
        Err(FakerError::InvalidLocale(_))
    ));
}

#[test]
fn test_locale_without_data_is_unsupported() {
    let err = Faker::new(Locale::parse("xx").unwrap(), test_store()).unwrap_err();
    assert!(matches!(err, FakerError::LocaleUnsupported(ref tag) if tag == "xx"));
}

#[test]
fn test_fetch_string_returns_first_element() {
    let (faker, _, _) = fixture("Hello");
    assert_eq!(faker.fetch_string("property.dummy").unwrap(), "x");
}

#[test]
fn test_fetch_returns_first_element() {
    let (faker, _, _) = fixture("Hello");
    assert_eq!(faker.fetch("property.dummy").unwrap(), "x");
}

#[test]
fn test_fetch_object_keeps_list() {
    let (faker, _, _) = fixture("Hello");
    assert_eq!(
        faker.fetch_object("property.dummy"),
        Some(RawValue::from(vec!["x", "y", "z"]))
    );
}

#[test]
fn test_safe_fetch() {
    let (faker, _, _) = fixture("Hello");
    assert_eq!(faker.safe_fetch("property.dummy", "none"), "x");
    assert_eq!(faker.safe_fetch("property.simple", "none"), "hello");
    assert_eq!(faker.safe_fetch("property.dummy2", ""), "");
}

#[test]
fn test_fetch_falls_back_to_english() {
    let (faker, _, _) = fixture("Hello");
    assert_eq!(faker.chain(), &[test_locale(), Locale::en()]);
    assert_eq!(faker.fetch("name.first_name").unwrap(), "Ada");
    assert!(matches!(
        faker.fetch("property.missing"),
        Err(FakerError::KeyNotFound { .. })
    ));
}

#[test]
fn test_bothify_with_two_args() {
    let faker = Faker::builder()
        .store(test_store())
        .locale(test_locale())
        .build()
        .unwrap();
    let re = Regex::new(r"^[A-Z]{2}\d{2}$").unwrap();
    for _ in 0..20 {
        let value = faker.resolve("property.bothify_2", faker.registry().root()).unwrap();
        assert!(re.is_match(&value), "{value}");
    }
}

#[test]
fn test_regexify_directive() {
    let (faker, dummy, _) = fixture("Hello");
    let value = faker.resolve("property.regexify1", &dummy).unwrap();
    assert!(["44", "45", "54", "55"].contains(&value.as_str()));
}

#[test]
fn test_regexify_slash_format_directive() {
    let (faker, dummy, _) = fixture("Hello");
    let value = faker.resolve("property.regexify_slash_format", &dummy).unwrap();
    assert!(["44", "45", "54", "55"].contains(&value.as_str()));
}

#[test]
fn test_regexify_literals_and_class() {
    let (faker, dummy, _) = fixture("Hello");
    let value = faker.resolve("property.regexify_cell", &dummy).unwrap();
    assert!(value == "459" || value == "479");
}

#[test]
fn test_resolve_operation_on_target() {
    let (faker, dummy, calls) = fixture("Yo!");

    let actual = faker.resolve("property.simpleResolution", &dummy).unwrap();

    assert_eq!(actual, "Yo!");
    assert_eq!(Calls::get(&calls.hello), 1);
    assert_eq!(Calls::get(&calls.superhero_name), 0);
}

#[test]
fn test_resolve_operation_on_namespace() {
    let (faker, dummy, calls) = fixture("Hello");

    let actual = faker.resolve("property.advancedResolution", &dummy).unwrap();

    assert_eq!(actual, "Luke Cage");
    assert_eq!(Calls::get(&calls.superhero_name), 1);
}

#[test]
fn test_resolve_list_value() {
    let (faker, dummy, calls) = fixture("Yo!");

    let actual = faker.resolve("property.resolutionWithList", &dummy).unwrap();

    assert_eq!(actual, "Yo!");
    assert_eq!(Calls::get(&calls.hello), 1);
}

#[test]
fn test_multiple_directives_are_joined() {
    let (faker, dummy, calls) = fixture("Yo Superman!");

    let actual = faker.resolve("property.multipleResolution", &dummy).unwrap();

    assert_eq!(actual, "Yo Superman! up up and away");
    assert_eq!(Calls::get(&calls.hello), 1);
    assert_eq!(Calls::get(&calls.descriptor), 1);
}

#[test]
fn test_locale_chains() {
    assert_eq!(
        Faker::locale_chain(&Locale::zh_cn()),
        vec![Locale::zh_cn(), Locale::zh(), Locale::en()]
    );
    assert_eq!(Faker::locale_chain(&Locale::en()), vec![Locale::en()]);
    assert_eq!(Faker::locale_chain(&Locale::zh()), vec![Locale::zh(), Locale::en()]);
}

#[test]
fn test_expression_with_unknown_namespace() {
    expression_should_fail_with(
        "#{ObjectNotOnFaker.methodName}",
        "Unable to resolve #{ObjectNotOnFaker.methodName} directive.",
    );
}

#[test]
fn test_expression_with_unknown_method() {
    expression_should_fail_with(
        "#{Name.nonExistentMethod}",
        "Unable to resolve #{Name.nonExistentMethod} directive.",
    );
}

#[test]
fn test_expression_with_invalid_arguments() {
    expression_should_fail_with(
        "#{Number.number_between 'x','y'}",
        "Unable to resolve #{Number.number_between 'x','y'} directive.",
    );
}

#[test]
fn test_expression_completely_unresolvable() {
    expression_should_fail_with("#{x}", "Unable to resolve #{x} directive.");
}

#[test]
fn test_expression_with_wrong_arity() {
    expression_should_fail_with(
        "#{Number.number_between '1'}",
        "Unable to resolve #{Number.number_between '1'} directive.",
    );
}

#[test]
fn test_operation_failure_is_unresolved() {
    expression_should_fail_with(
        "#{Number.numberBetween '9','1'}",
        "Unable to resolve #{Number.numberBetween '9','1'} directive.",
    );
}

#[test]
fn test_expression_without_directives_is_unchanged() {
    let (faker, dummy, calls) = fixture("Hello");
    let text = "plain text with # and ? and {braces}";
    assert_eq!(faker.expression(text, &dummy).unwrap(), text);
    assert_eq!(Calls::get(&calls.hello), 0);
}

#[test]
fn test_camel_case_operation_lookup() {
    let (faker, dummy, _) = fixture("Hello");
    assert_eq!(faker.expression("#{Name.firstName}", &dummy).unwrap(), "John");
    assert_eq!(faker.expression("#{Name.first_name}", &dummy).unwrap(), "John");
    assert_eq!(faker.expression("#{last_name}", &dummy).unwrap(), "Smith");
    assert_eq!(
        faker.expression("#{Number.number_between(3, 7)}", &dummy).unwrap(),
        "3"
    );
}

#[test]
fn test_id_number_provider() {
    let (faker, _, _) = fixture("Hello");
    assert_eq!(faker.expand("#{IdNumber.invalid}").unwrap(), "000-00-0000");
    assert!(matches!(
        faker.expand("#{IdNumber.valid}"),
        Err(FakerError::UnresolvedDirective { .. })
    ));
}

#[test]
fn test_depth_guard_on_cyclic_data() {
    let mut store = test_store();
    store
        .set(&Locale::en(), "cycle.a", "#{Cycle.b}")
        .set(&Locale::en(), "cycle.b", "#{Cycle.a}");
    let faker = Faker::builder()
        .store(store)
        .config(FakerConfig::new(Locale::en()).with_max_depth(16))
        .build()
        .unwrap();

    match faker.expand("#{Cycle.a}") {
        Err(FakerError::ExpansionTooDeep { limit, .. }) => assert_eq!(limit, 16),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_invalid_regexify_pattern_is_unresolved() {
    let (faker, _, _) = fixture("Hello");
    let err = faker.expand("#{regexify '(ab'}").unwrap_err();
    assert_eq!(err.to_string(), "Unable to resolve #{regexify '(ab'} directive.");
    assert!(matches!(
        faker.regexify("(ab"),
        Err(FakerError::InvalidPattern { .. })
    ));
}

#[test]
fn test_shared_faker_across_threads() {
    let faker = Arc::new(
        Faker::builder()
            .store(test_store())
            .locale(test_locale())
            .seed(3)
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let faker = Arc::clone(&faker);
            std::thread::spawn(move || faker.expand("#{regexify '[45]{2}'}").unwrap())
        })
        .collect();

    for handle in handles {
        let value = handle.join().unwrap();
        assert!(["44", "45", "54", "55"].contains(&value.as_str()));
    }
}
