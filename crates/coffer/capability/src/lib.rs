//! Coffer Capability - unforgeable role tokens gating privileged operations.
//!
//! Authorization is purely by possession: every privileged call takes a
//! token reference as its first argument, and there is no ambient
//! "current user". Tokens are move-only values — not `Clone`, not
//! serializable — so holding one is the authorization. The only mint path
//! is [`AuthoritySet::bootstrap`], which issues exactly one token per role;
//! a kernel records the issued [`TokenId`]s and rejects any other token,
//! which makes tokens from a different bring-up worthless against it.
//!
//! There is no revocation primitive. A compromised holder is handled by
//! transferring the token away — [`ControllerToken::transfer`] /
//! [`OperatorToken::transfer`] consume the old value, so the previous
//! holder cannot present it again.

#![deny(unsafe_code)]

use coffer_types::{HolderId, TokenId};
use tracing::info;

/// The two privileged roles of the system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Creates pools.
    Controller,
    /// Moves funds, issues flash loans, skims yield, records proofs.
    Operator,
}

/// Authority to create pools. Move-only; minted once per bring-up.
#[derive(Debug)]
pub struct ControllerToken {
    id: TokenId,
    holder: HolderId,
}

/// Authority to move funds, borrow, skim, and record reasoning proofs.
/// Move-only; minted once per bring-up.
#[derive(Debug)]
pub struct OperatorToken {
    id: TokenId,
    holder: HolderId,
}

impl ControllerToken {
    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn holder(&self) -> &HolderId {
        &self.holder
    }

    /// Hand the token off to a new holder. Consumes the old binding — the
    /// previous holder no longer has a value to present.
    pub fn transfer(self, new_holder: HolderId) -> Self {
        info!(token = %self.id, from = %self.holder, to = %new_holder, "controller token transferred");
        Self {
            id: self.id,
            holder: new_holder,
        }
    }
}

impl OperatorToken {
    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn holder(&self) -> &HolderId {
        &self.holder
    }

    /// Hand the token off to a new holder. Consumes the old binding — the
    /// previous holder no longer has a value to present.
    pub fn transfer(self, new_holder: HolderId) -> Self {
        info!(token = %self.id, from = %self.holder, to = %new_holder, "operator token transferred");
        Self {
            id: self.id,
            holder: new_holder,
        }
    }
}

/// The token ids issued at bring-up. Kernels keep this to recognize the
/// one genuine token of each role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthoritySet {
    pub controller: TokenId,
    pub operator: TokenId,
}

impl AuthoritySet {
    /// Mint the authority tokens for a new system bring-up: exactly one
    /// Controller and one Operator, both initially bound to `holder`.
    pub fn bootstrap(holder: HolderId) -> (Self, ControllerToken, OperatorToken) {
        let controller = ControllerToken {
            id: TokenId::new(),
            holder: holder.clone(),
        };
        let operator = OperatorToken {
            id: TokenId::new(),
            holder,
        };

        info!(
            controller = %controller.id,
            operator = %operator.id,
            "authority tokens minted"
        );

        let set = Self {
            controller: controller.id,
            operator: operator.id,
        };
        (set, controller, operator)
    }

    /// Whether `token` is the genuine token for `role` in this authority set.
    pub fn recognizes(&self, role: Role, id: TokenId) -> bool {
        match role {
            Role::Controller => self.controller == id,
            Role::Operator => self.operator == id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder(name: &str) -> HolderId {
        HolderId::new(name)
    }

    #[test]
    fn bootstrap_mints_distinct_tokens() {
        let (set, controller, operator) = AuthoritySet::bootstrap(holder("genesis"));
        assert_ne!(controller.id(), operator.id());
        assert!(set.recognizes(Role::Controller, controller.id()));
        assert!(set.recognizes(Role::Operator, operator.id()));
        assert!(!set.recognizes(Role::Operator, controller.id()));
    }

    #[test]
    fn transfer_rebinds_holder_and_preserves_id() {
        let (set, _controller, operator) = AuthoritySet::bootstrap(holder("genesis"));
        let original_id = operator.id();

        let operator = operator.transfer(holder("agent-1"));
        assert_eq!(operator.id(), original_id);
        assert_eq!(operator.holder(), &holder("agent-1"));
        assert!(set.recognizes(Role::Operator, operator.id()));
    }

    #[test]
    fn separate_bootstraps_are_not_interchangeable() {
        let (set_a, _ca, _oa) = AuthoritySet::bootstrap(holder("a"));
        let (_set_b, _cb, ob) = AuthoritySet::bootstrap(holder("b"));
        assert!(!set_a.recognizes(Role::Operator, ob.id()));
    }
}
