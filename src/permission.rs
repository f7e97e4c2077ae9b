// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Role-based permission gate.
//!
//! A [`Role`] declares the set of [`Capability`] tags it holds. Use cases ask
//! the gate for a capability before acting, so adding a capability never
//! touches existing roles.

use crate::PipelineError;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    ViewCatalog,
    CreateUser,
    DeleteUser,
    Purchase,
}

impl Capability {
    /// Action phrase used in denial messages.
    pub fn action(&self) -> &'static str {
        match self {
            Self::ViewCatalog => "view the catalog",
            Self::CreateUser => "create users",
            Self::DeleteUser => "delete users",
            Self::Purchase => "purchase",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    name: String,
    capabilities: BTreeSet<Capability>,
    catalog_view: String,
}

impl Role {
    pub fn new(
        name: impl Into<String>,
        capabilities: impl IntoIterator<Item = Capability>,
        catalog_view: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            capabilities: capabilities.into_iter().collect(),
            catalog_view: catalog_view.into(),
        }
    }

    pub fn admin() -> Self {
        Self::new(
            "admin",
            [
                Capability::ViewCatalog,
                Capability::CreateUser,
                Capability::DeleteUser,
            ],
            "full catalog",
        )
    }

    pub fn client() -> Self {
        Self::new(
            "client",
            [Capability::ViewCatalog, Capability::Purchase],
            "public catalog",
        )
    }

    pub fn guest() -> Self {
        Self::new("guest", [Capability::ViewCatalog], "limited catalog")
    }

    /// Can delete users but not create them.
    pub fn moderator() -> Self {
        Self::new(
            "moderator",
            [Capability::ViewCatalog, Capability::DeleteUser],
            "catalog (moderation mode)",
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.capabilities.iter().copied()
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// # Errors
    ///
    /// Returns [`PipelineError::PermissionDenied`] naming this role and the
    /// denied action.
    pub fn require(&self, capability: Capability) -> Result<(), PipelineError> {
        if self.allows(capability) {
            return Ok(());
        }
        tracing::warn!(role = %self.name, action = capability.action(), "permission denied");
        Err(PipelineError::PermissionDenied {
            role: self.name.clone(),
            action: capability.action().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub role: Role,
}

impl User {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }
}

pub fn show_catalog(user: &User) -> Result<String, PipelineError> {
    user.role.require(Capability::ViewCatalog)?;
    let message = format!("[{}] showing {}", user.role.name(), user.role.catalog_view);
    tracing::info!(user = %user.username, "{message}");
    Ok(message)
}

pub fn create_user(actor: &User, new_username: &str) -> Result<String, PipelineError> {
    actor.role.require(Capability::CreateUser)?;
    let message = format!("[{}] user '{}' created", actor.role.name(), new_username);
    tracing::info!(actor = %actor.username, "{message}");
    Ok(message)
}

pub fn delete_user(actor: &User, username: &str) -> Result<String, PipelineError> {
    actor.role.require(Capability::DeleteUser)?;
    let message = format!("[{}] user '{}' deleted", actor.role.name(), username);
    tracing::info!(actor = %actor.username, "{message}");
    Ok(message)
}

pub fn purchase(buyer: &User, product_id: &str, qty: u32) -> Result<String, PipelineError> {
    buyer.role.require(Capability::Purchase)?;
    let message = format!(
        "[{}] bought {} unit(s) of product '{}'",
        buyer.role.name(),
        qty,
        product_id
    );
    tracing::info!(buyer = %buyer.username, "{message}");
    Ok(message)
}
