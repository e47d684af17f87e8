#![cfg(feature = "memory-provider")]

use erp_access::{
    AuthService, AuthSnapshot, Error, IdentityProvider, MemoryProvider, Permission, ProfileStore,
    Role, RouteDecision, RouteGuard, SignUpRequest, default_menu,
};
use futures::executor::block_on;

fn seeded_service() -> AuthService<MemoryProvider> {
    let provider = MemoryProvider::new();
    provider.seed_demo_users().expect("seeding");
    AuthService::new(provider)
}

#[test]
fn service_starts_loading_until_initialized() {
    let service = seeded_service();
    assert!(service.state().is_loading());

    block_on(service.initialize()).unwrap();
    assert_eq!(service.state(), AuthSnapshot::Unauthenticated);
}

#[test]
fn accountant_sign_in_grants_accounting_but_not_payroll() {
    let service = seeded_service();
    block_on(service.sign_in("accountant@company.com", "accountant123")).unwrap();

    assert!(service.is_authenticated());
    assert!(service.has_role([Role::Accountant]));
    assert!(service.has_permission(Permission::AccountingEdit));
    assert!(!service.has_permission(Permission::PayrollEdit));

    let user = service.state().user().cloned().expect("user");
    assert_eq!(user.email, "accountant@company.com");
    assert!(user.last_login.is_some());
}

#[test]
fn wrong_password_surfaces_the_provider_message() {
    let service = seeded_service();
    let err = block_on(service.sign_in("accountant@company.com", "nope")).expect_err("must fail");

    match err {
        Error::Credentials(message) => assert_eq!(message, "invalid email or password"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!service.is_authenticated());
}

#[test]
fn session_without_profile_is_not_authenticated() {
    let provider = MemoryProvider::new();
    let user_id = provider
        .register(SignUpRequest {
            email: "ghost@company.com".to_string(),
            password: "ghost-1234".to_string(),
            name: "Ghost User".to_string(),
            role: Role::Viewer,
        })
        .unwrap();
    provider.remove_profile(&user_id);

    let service = AuthService::new(provider);
    let err =
        block_on(service.sign_in("ghost@company.com", "ghost-1234")).expect_err("must fail");
    assert!(matches!(err, Error::ProfileUnresolved { .. }));
    assert_eq!(service.state(), AuthSnapshot::Unauthenticated);
    assert!(service.visible_entries(&default_menu()).is_empty());
}

#[test]
fn sign_up_then_sign_in_uses_the_requested_role() {
    let service = seeded_service();
    block_on(service.sign_up(SignUpRequest {
        email: "newhire@company.com".to_string(),
        password: "newhire-1234".to_string(),
        name: "New Hire".to_string(),
        role: Role::HrManager,
    }))
    .unwrap();

    // Sign-up alone does not establish a session.
    assert!(!service.is_authenticated());

    block_on(service.sign_in("newhire@company.com", "newhire-1234")).unwrap();
    assert!(service.has_role([Role::HrManager]));
    assert!(service.has_permission(Permission::PayrollEdit));
}

#[test]
fn duplicate_sign_up_is_a_registration_error() {
    let service = seeded_service();
    let err = block_on(service.sign_up(SignUpRequest {
        email: "viewer@company.com".to_string(),
        password: "viewer123".to_string(),
        name: "Viewer Again".to_string(),
        role: Role::Viewer,
    }))
    .expect_err("must fail");
    assert!(matches!(err, Error::Registration(_)));
}

#[test]
fn sign_out_clears_state_and_navigation_immediately() {
    let service = seeded_service();
    block_on(service.sign_in("manager@company.com", "manager123")).unwrap();
    assert!(!service.visible_entries(&default_menu()).is_empty());

    block_on(service.sign_out()).unwrap();
    assert!(!service.is_authenticated());
    assert!(service.visible_entries(&default_menu()).is_empty());
    assert_eq!(
        block_on(service.provider().current_session()).unwrap(),
        None
    );
}

#[test]
fn initialize_adopts_an_existing_provider_session() {
    let provider = MemoryProvider::new();
    provider.seed_demo_users().unwrap();
    block_on(provider.sign_in("sales@company.com", "sales123")).unwrap();

    let service = AuthService::new(provider);
    block_on(service.initialize()).unwrap();
    assert!(service.has_role([Role::Sales]));
}

#[test]
fn menu_filtering_tracks_the_signed_in_role() {
    let service = seeded_service();
    let menu = default_menu();

    block_on(service.sign_in("accountant@company.com", "accountant123")).unwrap();
    let visible = service.visible_entries(&menu);
    assert!(visible.iter().any(|entry| entry.id.as_str() == "accounting"));
    assert!(!visible.iter().any(|entry| entry.id.as_str() == "settings"));

    block_on(service.sign_in("viewer@company.com", "viewer123")).unwrap();
    let visible = service.visible_entries(&menu);
    assert!(!visible.iter().any(|entry| entry.id.as_str() == "accounting"));
}

#[test]
fn route_guard_decisions_follow_the_documented_order() {
    let service = seeded_service();
    let export_guard = RouteGuard::new().require_permission(Permission::ReportsExport);

    // Loading wins before any constraint is consulted.
    assert_eq!(service.resolve_view(&export_guard), RouteDecision::Loading);

    block_on(service.initialize()).unwrap();
    assert_eq!(service.resolve_view(&export_guard), RouteDecision::Fallback);

    block_on(service.sign_in("viewer@company.com", "viewer123")).unwrap();
    assert!(matches!(
        service.resolve_view(&export_guard),
        RouteDecision::Denied(erp_access::DenialReason::MissingPermission(
            Permission::ReportsExport
        ))
    ));

    block_on(service.sign_in("hr@company.com", "hr123")).unwrap();
    assert_eq!(service.resolve_view(&export_guard), RouteDecision::Render);

    let admin_guard = RouteGuard::new().require_roles([Role::SuperAdmin, Role::Admin]);
    assert!(matches!(
        service.resolve_view(&admin_guard),
        RouteDecision::Denied(erp_access::DenialReason::MissingRole)
    ));
}

#[test]
fn switching_users_replaces_the_whole_auth_pair() {
    let service = seeded_service();
    block_on(service.sign_in("admin@company.com", "admin123")).unwrap();
    let first_session = service.state().session().cloned().expect("session");

    block_on(service.sign_in("viewer@company.com", "viewer123")).unwrap();
    let snapshot = service.state();
    let session = snapshot.session().expect("session");
    let user = snapshot.user().expect("user");

    assert_ne!(session, &first_session);
    assert_eq!(session.user_id(), &user.id);
    assert_eq!(user.role, Role::Viewer);
    assert!(!service.has_permission(Permission::UsersView));
}

#[test]
fn refresh_user_picks_up_profile_changes() {
    let service = seeded_service();
    block_on(service.sign_in("sales@company.com", "sales123")).unwrap();
    let user_id = service.state().user().unwrap().id.clone();

    block_on(service.provider().record_login(&user_id)).unwrap();
    block_on(service.refresh_user()).unwrap();

    assert!(service.is_authenticated());
    assert!(service.state().user().unwrap().last_login.is_some());
}
