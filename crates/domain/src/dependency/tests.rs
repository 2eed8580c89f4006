use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use crate::catalog::{is_known_permission, list_all_permissions};
use crate::grant::PermissionGrant;

use super::{
    DependencyTable, PERMISSION_DEPENDENCIES, PermissionDependency, resolve_dependencies,
    toggle_permission,
};

const CHAINED: DependencyTable = DependencyTable::new(&[
    PermissionDependency::new("gallery.publish", "gallery.edit"),
    PermissionDependency::new("gallery.edit", "gallery.view"),
]);

fn grant_strategy() -> impl Strategy<Value = PermissionGrant> {
    let catalog_keys: Vec<String> = list_all_permissions()
        .into_iter()
        .map(|permission| permission.key().to_owned())
        .collect();
    let key = prop_oneof![
        4 => proptest::sample::select(catalog_keys),
        1 => "[a-z]{1,6}\\.[a-z_]{1,8}",
    ];

    proptest::collection::btree_map(key, any::<bool>(), 0..24).prop_map(PermissionGrant::from)
}

fn implied_by(grant: &PermissionGrant) -> BTreeSet<&'static str> {
    let mut implied = BTreeSet::new();
    let mut pending: Vec<String> = grant
        .granted_keys()
        .into_iter()
        .map(str::to_owned)
        .collect();

    while let Some(key) = pending.pop() {
        for prerequisite in PERMISSION_DEPENDENCIES.prerequisites_of(&key) {
            if implied.insert(prerequisite) {
                pending.push(prerequisite.to_owned());
            }
        }
    }

    implied
}

#[test]
fn table_only_references_catalog_keys_within_one_category() {
    for pair in PERMISSION_DEPENDENCIES.pairs() {
        assert!(is_known_permission(pair.dependent()), "{}", pair.dependent());
        assert!(is_known_permission(pair.prerequisite()), "{}", pair.prerequisite());
        assert_ne!(pair.dependent(), pair.prerequisite());

        let dependent_category = pair.dependent().split_once('.').map(|(category, _)| category);
        let prerequisite_category = pair
            .prerequisite()
            .split_once('.')
            .map(|(category, _)| category);
        assert_eq!(dependent_category, prerequisite_category);
    }
}

#[test]
fn edit_employee_implies_view_only() {
    let resolved = resolve_dependencies(&PermissionGrant::from_flags([(
        "manage_employees.edit",
        true,
    )]));

    assert_eq!(
        resolved,
        PermissionGrant::from_flags([
            ("manage_employees.edit", true),
            ("manage_employees.view", true),
        ])
    );
}

#[test]
fn explicit_false_prerequisite_is_overridden() {
    let resolved = resolve_dependencies(&PermissionGrant::from_flags([
        ("appointments.cancel", true),
        ("appointments.view", false),
    ]));

    assert_eq!(resolved.get("appointments.view"), Some(true));
    assert_eq!(resolved.get("appointments.cancel"), Some(true));
}

#[test]
fn several_dependents_share_one_prerequisite() {
    let resolved = resolve_dependencies(&PermissionGrant::from_flags([
        ("reports.financial_reports", true),
        ("reports.export", true),
    ]));

    assert!(resolved.is_granted("reports.view"));
    assert!(resolved.is_granted("reports.financial_reports"));
    assert!(resolved.is_granted("reports.export"));
    assert_eq!(resolved.len(), 3);
}

#[test]
fn empty_grant_implies_nothing() {
    assert!(resolve_dependencies(&PermissionGrant::new()).is_empty());
}

#[test]
fn unknown_keys_pass_through() {
    let grant = PermissionGrant::from_flags([("unknown.key", true)]);
    assert_eq!(resolve_dependencies(&grant), grant);
}

#[test]
fn schedule_management_requires_schedule_view_not_professional_view() {
    let resolved = resolve_dependencies(&PermissionGrant::from_flags([(
        "manage_service_professionals.manage_schedule",
        true,
    )]));

    assert!(resolved.is_granted("manage_service_professionals.view_schedule"));
    assert_eq!(resolved.get("manage_service_professionals.view"), None);
}

#[test]
fn chained_rules_resolve_to_fixed_point() {
    let resolved = CHAINED.resolve(&PermissionGrant::from_flags([("gallery.publish", true)]));

    assert!(resolved.is_granted("gallery.edit"));
    assert!(resolved.is_granted("gallery.view"));
    assert!(CHAINED.is_closed(&resolved));
}

#[test]
fn violations_list_broken_rules() {
    let grant = PermissionGrant::from_flags([
        ("system_settings.edit", true),
        ("salon_info.edit_photos", true),
        ("salon_info.view", true),
    ]);

    assert_eq!(
        PERMISSION_DEPENDENCIES.violations(&grant),
        vec![PermissionDependency::new(
            "system_settings.edit",
            "system_settings.view"
        )]
    );
}

#[test]
fn enabling_a_toggle_grants_prerequisites() {
    let toggled = toggle_permission(
        &PermissionGrant::new(),
        "content_management.moderate_posts",
        true,
    );

    assert!(toggled.is_granted("content_management.moderate_posts"));
    assert!(toggled.is_granted("content_management.view_posts"));
}

#[test]
fn disabling_a_prerequisite_disables_its_dependents() {
    let grant = PermissionGrant::from_flags([
        ("appointments.view", true),
        ("appointments.edit", true),
        ("appointments.cancel", true),
        ("appointments.create", true),
        ("reports.view", true),
    ]);

    let toggled = toggle_permission(&grant, "appointments.view", false);

    assert_eq!(toggled.get("appointments.view"), Some(false));
    assert_eq!(toggled.get("appointments.edit"), Some(false));
    assert_eq!(toggled.get("appointments.cancel"), Some(false));
    assert_eq!(toggled.get("appointments.reschedule"), None);
    assert!(toggled.is_granted("appointments.create"));
    assert!(toggled.is_granted("reports.view"));
}

#[test]
fn disabling_follows_chains() {
    let grant = CHAINED.resolve(&PermissionGrant::from_flags([("gallery.publish", true)]));

    let toggled = CHAINED.toggle(&grant, "gallery.view", false);

    assert!(toggled.granted_keys().is_empty());
    assert_eq!(toggled.len(), 3);
}

#[test]
fn disabling_a_dependent_keeps_its_prerequisite() {
    let grant = resolve_dependencies(&PermissionGrant::from_flags([("reports.export", true)]));

    let toggled = toggle_permission(&grant, "reports.export", false);

    assert!(toggled.is_granted("reports.view"));
    assert_eq!(toggled.get("reports.export"), Some(false));
}

proptest! {
    #[test]
    fn resolve_is_idempotent(grant in grant_strategy()) {
        let once = resolve_dependencies(&grant);
        prop_assert_eq!(resolve_dependencies(&once), once);
    }

    #[test]
    fn resolve_never_revokes(grant in grant_strategy()) {
        let resolved = resolve_dependencies(&grant);
        for key in grant.granted_keys() {
            prop_assert!(resolved.is_granted(key));
        }
    }

    #[test]
    fn resolve_output_is_closed(grant in grant_strategy()) {
        let resolved = resolve_dependencies(&grant);
        for pair in PERMISSION_DEPENDENCIES.pairs() {
            if resolved.is_granted(pair.dependent()) {
                prop_assert!(resolved.is_granted(pair.prerequisite()));
            }
        }
    }

    #[test]
    fn resolve_only_touches_implied_keys(grant in grant_strategy()) {
        let resolved = resolve_dependencies(&grant);
        let implied = implied_by(&grant);

        let keys: BTreeSet<&String> = grant
            .iter()
            .map(|(key, _)| key)
            .chain(resolved.iter().map(|(key, _)| key))
            .collect();
        for key in keys {
            if !implied.contains(key.as_str()) {
                prop_assert_eq!(resolved.get(key), grant.get(key));
            }
        }
    }

    #[test]
    fn toggle_output_is_closed(
        grant in grant_strategy(),
        index in 0usize..64,
        enabled in any::<bool>(),
    ) {
        let keys = list_all_permissions();
        let key = keys[index % keys.len()].key();

        let toggled = toggle_permission(&grant, key, enabled);

        prop_assert!(PERMISSION_DEPENDENCIES.is_closed(&toggled));
        prop_assert_eq!(toggled.is_granted(key), enabled);
    }
}

#[test]
fn resolve_accepts_maps_built_elsewhere() {
    let map = BTreeMap::from([("salon_info.edit_description".to_owned(), true)]);
    let resolved = resolve_dependencies(&PermissionGrant::from(map));
    assert!(resolved.is_granted("salon_info.view"));
}
