use std::collections::BTreeSet;

use serde::Serialize;

use crate::grant::PermissionGrant;

/// Implication rule: holding `dependent` requires holding `prerequisite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PermissionDependency {
    dependent: &'static str,
    prerequisite: &'static str,
}

impl PermissionDependency {
    /// Creates an implication rule.
    #[must_use]
    pub const fn new(dependent: &'static str, prerequisite: &'static str) -> Self {
        Self {
            dependent,
            prerequisite,
        }
    }

    /// Returns the key that carries the requirement.
    #[must_use]
    pub fn dependent(&self) -> &'static str {
        self.dependent
    }

    /// Returns the key that must be granted alongside the dependent.
    #[must_use]
    pub fn prerequisite(&self) -> &'static str {
        self.prerequisite
    }
}

/// Declarative set of implication rules applied by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyTable {
    pairs: &'static [PermissionDependency],
}

/// Implication rules for the staff permission catalog.
pub const PERMISSION_DEPENDENCIES: DependencyTable = DependencyTable::new(&[
    PermissionDependency::new("manage_employees.edit", "manage_employees.view"),
    PermissionDependency::new("manage_employees.remove", "manage_employees.view"),
    PermissionDependency::new(
        "manage_employees.manage_permissions",
        "manage_employees.view",
    ),
    PermissionDependency::new(
        "manage_service_professionals.edit",
        "manage_service_professionals.view",
    ),
    PermissionDependency::new(
        "manage_service_professionals.remove",
        "manage_service_professionals.view",
    ),
    PermissionDependency::new(
        "manage_service_professionals.manage_schedule",
        "manage_service_professionals.view_schedule",
    ),
    PermissionDependency::new("appointments.edit", "appointments.view"),
    PermissionDependency::new("appointments.cancel", "appointments.view"),
    PermissionDependency::new("appointments.reschedule", "appointments.view"),
    PermissionDependency::new("salon_info.edit_basic_info", "salon_info.view"),
    PermissionDependency::new("salon_info.edit_social_media", "salon_info.view"),
    PermissionDependency::new("salon_info.edit_photos", "salon_info.view"),
    PermissionDependency::new("salon_info.edit_description", "salon_info.view"),
    PermissionDependency::new("reports.export", "reports.view"),
    PermissionDependency::new("reports.financial_reports", "reports.view"),
    PermissionDependency::new("reports.performance_reports", "reports.view"),
    PermissionDependency::new("system_settings.edit", "system_settings.view"),
    PermissionDependency::new("system_settings.manage_integrations", "system_settings.view"),
    PermissionDependency::new(
        "content_management.manage_main_posts",
        "content_management.view_posts",
    ),
    PermissionDependency::new(
        "content_management.moderate_posts",
        "content_management.view_posts",
    ),
]);

impl DependencyTable {
    /// Creates a table over a static rule list.
    #[must_use]
    pub const fn new(pairs: &'static [PermissionDependency]) -> Self {
        Self { pairs }
    }

    /// Returns every rule in declaration order.
    #[must_use]
    pub fn pairs(&self) -> &'static [PermissionDependency] {
        self.pairs
    }

    /// Returns the direct prerequisites of a key.
    #[must_use]
    pub fn prerequisites_of(&self, key: &str) -> Vec<&'static str> {
        self.pairs
            .iter()
            .filter(|pair| pair.dependent == key)
            .map(|pair| pair.prerequisite)
            .collect()
    }

    /// Returns the keys that directly depend on a key.
    #[must_use]
    pub fn dependents_of(&self, key: &str) -> Vec<&'static str> {
        self.pairs
            .iter()
            .filter(|pair| pair.prerequisite == key)
            .map(|pair| pair.dependent)
            .collect()
    }

    /// Returns the rules a grant currently breaks.
    #[must_use]
    pub fn violations(&self, grant: &PermissionGrant) -> Vec<PermissionDependency> {
        self.pairs
            .iter()
            .filter(|pair| grant.is_granted(pair.dependent) && !grant.is_granted(pair.prerequisite))
            .copied()
            .collect()
    }

    /// Returns whether every rule holds for the grant.
    #[must_use]
    pub fn is_closed(&self, grant: &PermissionGrant) -> bool {
        self.violations(grant).is_empty()
    }

    /// Grants every prerequisite implied by the granted keys.
    ///
    /// Rules are applied until nothing changes, so chains of implications are
    /// followed to the end. Granted keys are never revoked and keys outside the
    /// table pass through untouched.
    #[must_use]
    pub fn resolve(&self, grant: &PermissionGrant) -> PermissionGrant {
        let mut resolved = grant.clone();

        loop {
            let mut changed = false;
            for pair in self.pairs {
                if resolved.is_granted(pair.dependent) && !resolved.is_granted(pair.prerequisite) {
                    resolved.set(pair.prerequisite, true);
                    changed = true;
                }
            }

            if !changed {
                return resolved;
            }
        }
    }

    /// Applies one permission toggle and returns a closed grant.
    ///
    /// Enabling a key also grants its prerequisites. Disabling a key also
    /// disables every granted key that depends on it, directly or through a
    /// chain.
    #[must_use]
    pub fn toggle(&self, grant: &PermissionGrant, key: &str, enabled: bool) -> PermissionGrant {
        let mut toggled = grant.clone();
        toggled.set(key, enabled);

        if !enabled {
            for dependent in self.transitive_dependents_of(key) {
                if toggled.is_granted(dependent) {
                    toggled.set(dependent, false);
                }
            }
        }

        self.resolve(&toggled)
    }

    fn transitive_dependents_of(&self, key: &str) -> BTreeSet<&'static str> {
        let mut found = BTreeSet::new();
        let mut pending = self.dependents_of(key);

        while let Some(dependent) = pending.pop() {
            if found.insert(dependent) {
                pending.extend(self.dependents_of(dependent));
            }
        }

        found
    }
}

/// Resolves a grant against the staff permission dependency table.
#[must_use]
pub fn resolve_dependencies(grant: &PermissionGrant) -> PermissionGrant {
    PERMISSION_DEPENDENCIES.resolve(grant)
}

/// Applies one toggle against the staff permission dependency table.
#[must_use]
pub fn toggle_permission(grant: &PermissionGrant, key: &str, enabled: bool) -> PermissionGrant {
    PERMISSION_DEPENDENCIES.toggle(grant, key, enabled)
}

#[cfg(test)]
mod tests;
