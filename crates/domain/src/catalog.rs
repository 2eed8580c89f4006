use serde::Serialize;

/// Atomic staff capability identified by a dotted `"<category>.<action>"` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Permission {
    key: &'static str,
    label: &'static str,
    description: Option<&'static str>,
}

impl Permission {
    const fn new(
        key: &'static str,
        label: &'static str,
        description: Option<&'static str>,
    ) -> Self {
        Self {
            key,
            label,
            description,
        }
    }

    /// Returns the stable storage key.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Returns the optional long description.
    #[must_use]
    pub fn description(&self) -> Option<&'static str> {
        self.description
    }

    /// Returns the category segment of the key.
    #[must_use]
    pub fn category_id(&self) -> &'static str {
        self.key
            .split_once('.')
            .map_or(self.key, |(category, _)| category)
    }

    /// Returns the action segment of the key.
    #[must_use]
    pub fn action(&self) -> &'static str {
        self.key.split_once('.').map_or("", |(_, action)| action)
    }
}

/// Named, ordered group of permissions rendered as one checkbox group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionCategory {
    id: &'static str,
    title: &'static str,
    icon: &'static str,
    permissions: &'static [Permission],
}

impl PermissionCategory {
    /// Returns the stable category identifier.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Returns the display icon name.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        self.icon
    }

    /// Returns the category permissions in display order.
    #[must_use]
    pub fn permissions(&self) -> &'static [Permission] {
        self.permissions
    }
}

/// Every permission category, in display order.
pub const PERMISSION_CATALOG: &[PermissionCategory] = &[
    PermissionCategory {
        id: "manage_employees",
        title: "Manage Employees",
        icon: "users",
        permissions: &[
            Permission::new(
                "manage_employees.view",
                "View employees",
                Some("See the salon's employee list and profiles"),
            ),
            Permission::new(
                "manage_employees.add",
                "Add employees",
                Some("Invite new employees to the salon"),
            ),
            Permission::new(
                "manage_employees.edit",
                "Edit employees",
                Some("Change employee roles and details"),
            ),
            Permission::new(
                "manage_employees.remove",
                "Remove employees",
                Some("End an employee's relationship with the salon"),
            ),
            Permission::new(
                "manage_employees.manage_permissions",
                "Manage permissions",
                Some("Grant and revoke employee permissions"),
            ),
        ],
    },
    PermissionCategory {
        id: "manage_service_professionals",
        title: "Service Professionals",
        icon: "scissors",
        permissions: &[
            Permission::new(
                "manage_service_professionals.view",
                "View professionals",
                Some("See the professionals linked to the salon"),
            ),
            Permission::new(
                "manage_service_professionals.add",
                "Add professionals",
                Some("Link new service professionals to the salon"),
            ),
            Permission::new(
                "manage_service_professionals.edit",
                "Edit professionals",
                Some("Change professional details and services"),
            ),
            Permission::new(
                "manage_service_professionals.remove",
                "Remove professionals",
                Some("Unlink service professionals from the salon"),
            ),
            Permission::new(
                "manage_service_professionals.view_schedule",
                "View schedules",
                Some("See professionals' working hours"),
            ),
            Permission::new(
                "manage_service_professionals.manage_schedule",
                "Manage schedules",
                Some("Change professionals' working hours and breaks"),
            ),
        ],
    },
    PermissionCategory {
        id: "appointments",
        title: "Appointments",
        icon: "calendar",
        permissions: &[
            Permission::new(
                "appointments.view",
                "View appointments",
                Some("See the salon agenda"),
            ),
            Permission::new(
                "appointments.create",
                "Create appointments",
                Some("Book new appointments for clients"),
            ),
            Permission::new(
                "appointments.edit",
                "Edit appointments",
                Some("Change appointment services and notes"),
            ),
            Permission::new("appointments.cancel", "Cancel appointments", None),
            Permission::new("appointments.reschedule", "Reschedule appointments", None),
        ],
    },
    PermissionCategory {
        id: "salon_info",
        title: "Salon Information",
        icon: "store",
        permissions: &[
            Permission::new("salon_info.view", "View salon information", None),
            Permission::new(
                "salon_info.edit_basic_info",
                "Edit basic information",
                Some("Change name, address and contact details"),
            ),
            Permission::new(
                "salon_info.edit_social_media",
                "Edit social media",
                Some("Change social media links"),
            ),
            Permission::new(
                "salon_info.edit_photos",
                "Edit photos",
                Some("Change profile and cover photos"),
            ),
            Permission::new("salon_info.edit_description", "Edit description", None),
        ],
    },
    PermissionCategory {
        id: "reports",
        title: "Reports",
        icon: "bar-chart",
        permissions: &[
            Permission::new("reports.view", "View reports", None),
            Permission::new(
                "reports.export",
                "Export reports",
                Some("Download report data"),
            ),
            Permission::new(
                "reports.financial_reports",
                "Financial reports",
                Some("See revenue and billing figures"),
            ),
            Permission::new(
                "reports.performance_reports",
                "Performance reports",
                Some("See per-professional performance"),
            ),
        ],
    },
    PermissionCategory {
        id: "system_settings",
        title: "System Settings",
        icon: "settings",
        permissions: &[
            Permission::new("system_settings.view", "View settings", None),
            Permission::new("system_settings.edit", "Edit settings", None),
            Permission::new(
                "system_settings.manage_integrations",
                "Manage integrations",
                Some("Connect and disconnect external services"),
            ),
        ],
    },
    PermissionCategory {
        id: "content_management",
        title: "Content Management",
        icon: "image",
        permissions: &[
            Permission::new(
                "content_management.view_posts",
                "View posts",
                Some("See the salon's BeautyWall posts"),
            ),
            Permission::new(
                "content_management.manage_main_posts",
                "Manage main posts",
                Some("Choose the posts highlighted on the salon profile"),
            ),
            Permission::new(
                "content_management.moderate_posts",
                "Moderate posts",
                Some("Hide or remove posts and comments"),
            ),
        ],
    },
];

/// Returns every category in display order.
#[must_use]
pub fn list_categories() -> &'static [PermissionCategory] {
    PERMISSION_CATALOG
}

/// Returns every permission, categories in catalog order and each category's
/// permissions in their defined order.
#[must_use]
pub fn list_all_permissions() -> Vec<&'static Permission> {
    PERMISSION_CATALOG
        .iter()
        .flat_map(|category| category.permissions.iter())
        .collect()
}

/// Returns the permissions of one category, or an empty list when the
/// category id is unknown.
#[must_use]
pub fn list_permissions_for_category(category_id: &str) -> Vec<&'static Permission> {
    find_category(category_id)
        .map(|category| category.permissions.iter().collect())
        .unwrap_or_default()
}

/// Finds a category by id.
#[must_use]
pub fn find_category(category_id: &str) -> Option<&'static PermissionCategory> {
    PERMISSION_CATALOG
        .iter()
        .find(|category| category.id == category_id)
}

/// Finds a permission by its dotted key.
#[must_use]
pub fn find_permission(key: &str) -> Option<&'static Permission> {
    let (category_id, _) = key.split_once('.')?;
    find_category(category_id)?
        .permissions
        .iter()
        .find(|permission| permission.key == key)
}

/// Returns whether the key names a catalog permission.
#[must_use]
pub fn is_known_permission(key: &str) -> bool {
    find_permission(key).is_some()
}
