use folio::domain::config::ApiConfig;
use folio::features::contact::Contact;
use folio::kernel::server::ApiState;
use std::any::TypeId;

#[test]
fn init_registers_the_contact_slice() {
    let slices = folio::init(&ApiConfig::default()).expect("init should succeed");
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].id, TypeId::of::<Contact>());

    let state = ApiState::builder().config(ApiConfig::default()).register_slices(slices).build().unwrap();
    assert!(state.get_slice::<Contact>().is_some());
}

#[test]
fn init_surfaces_configuration_errors() {
    let mut config = ApiConfig::default();
    config.contact.recipient = "nobody".to_owned();

    let err = folio::init(&config).unwrap_err();
    assert!(err.to_string().contains("recipient"));
}

#[test]
fn api_router_documents_both_route_groups() {
    let (_, api) = folio::server::router::api_router().split_for_parts();
    assert!(api.paths.paths.contains_key("/health"));
    assert!(api.paths.paths.contains_key("/contact"));
}

