use metaform::MetaValue;
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("metaform=debug".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

pub fn doc(text: &str) -> MetaValue {
    MetaValue::parse_json5(text).expect("fixture parses")
}
