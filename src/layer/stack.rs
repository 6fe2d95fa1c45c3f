//! Stacking tiers and drag eligibility.

use std::sync::atomic::{AtomicU64, Ordering};

use super::{Layer, Tier};
use crate::config::MascotConfig;
use crate::error::{MascotError, Result};
use crate::notice::Notice;
use crate::part::PartName;

/// Result of a tier change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierChange {
    pub part: PartName,
    pub from: Tier,
    pub to: Tier,
    /// Set when the change cost the layer its drag eligibility.
    pub demoted: Option<Notice>,
}

/// Owns every layer and the single drag-active slot.
///
/// Invariants:
/// - a layer in [`Tier::Back`] is never drag-eligible;
/// - the drag-active layer, if any, is drag-eligible;
/// - at most one member of the exclusive drag group is drag-eligible.
///
/// Every stack, clones included, gets its own [`id`](Self::id).
#[derive(Debug)]
pub struct LayerStack {
    id: u64,
    layers: Vec<Layer>,
    drag_active: Option<PartName>,
    exclusive_group: Vec<PartName>,
    revision: u64,
}

static NEXT_STACK_ID: AtomicU64 = AtomicU64::new(0);

fn next_stack_id() -> u64 {
    NEXT_STACK_ID.fetch_add(1, Ordering::Relaxed)
}

impl Clone for LayerStack {
    fn clone(&self) -> Self {
        Self {
            id: next_stack_id(),
            layers: self.layers.clone(),
            drag_active: self.drag_active.clone(),
            exclusive_group: self.exclusive_group.clone(),
            revision: self.revision,
        }
    }
}

impl LayerStack {
    pub fn new(config: &MascotConfig) -> Self {
        Self {
            id: next_stack_id(),
            layers: config.parts.iter().map(Layer::new).collect(),
            drag_active: None,
            exclusive_group: config.exclusive_drag_group.clone(),
            revision: 0,
        }
    }

    /// Layers in configuration order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layers sorted back to front. Layers sharing a tier keep configuration order.
    pub fn stacking_order(&self) -> Vec<&Layer> {
        let mut ordered: Vec<&Layer> = self.layers.iter().collect();
        ordered.sort_by_key(|layer| layer.tier());
        ordered
    }

    pub fn layer(&self, part: &PartName) -> Result<&Layer> {
        self.layers
            .iter()
            .find(|layer| layer.part() == part)
            .ok_or_else(|| MascotError::UnknownPart { part: part.clone() })
    }

    /// Mutable access to a layer. Counts as a change for cache purposes.
    pub(crate) fn layer_mut(&mut self, part: &PartName) -> Result<&mut Layer> {
        let layer = self
            .layers
            .iter_mut()
            .find(|layer| layer.part() == part)
            .ok_or_else(|| MascotError::UnknownPart { part: part.clone() })?;
        self.revision = self.revision.wrapping_add(1);
        Ok(layer)
    }

    /// Process-unique identity of this stack.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Increments on every mutation of any layer.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The layer currently allowed to receive positioning input.
    pub fn drag_active(&self) -> Option<&PartName> {
        self.drag_active.as_ref()
    }

    /// Whether pointer input should be routed to this part's layer.
    pub fn is_responsive(&self, part: &PartName) -> bool {
        self.drag_active.as_ref() == Some(part)
    }

    // ---- Tiers ----

    /// Advances the part's tier: back, neutral, front, back.
    pub fn cycle_tier(&mut self, part: &PartName) -> Result<TierChange> {
        let next = self.layer(part)?.tier().next();
        self.set_tier(part, next)
    }

    /// Moves a layer to `tier`.
    ///
    /// Every tier change goes through here. Sending a drag-eligible layer to
    /// the back tier clears its eligibility, releases it from the drag-active
    /// slot, and reports a [`Notice::MovementDisabled`].
    pub fn set_tier(&mut self, part: &PartName, tier: Tier) -> Result<TierChange> {
        let was_active = self.is_responsive(part);
        let layer = self.layer_mut(part)?;
        let from = layer.tier();
        layer.set_tier(tier);

        let mut demoted = None;
        if !tier.allows_drag() && layer.is_drag_eligible() {
            layer.set_drag_eligible(false);
            demoted = Some(Notice::MovementDisabled {
                part: part.clone(),
                label: layer.label().to_string(),
            });
        }

        if demoted.is_some() && was_active {
            self.drag_active = None;
        }

        tracing::debug!(part = %part, ?from, to = ?tier, demoted = demoted.is_some(), "tier changed");
        Ok(TierChange {
            part: part.clone(),
            from,
            to: tier,
            demoted,
        })
    }

    // ---- Drag eligibility ----

    /// Makes the part the sole drag-active layer.
    ///
    /// Fails with [`MascotError::IneligibleTier`] for a back-tier layer, in
    /// which case nothing changes. Enabling one member of the exclusive drag
    /// group clears the others.
    pub fn request_drag_eligibility(&mut self, part: &PartName) -> Result<()> {
        let layer = self.layer(part)?;
        if !layer.tier().allows_drag() {
            tracing::warn!(part = %part, "drag refused for back-tier layer");
            return Err(MascotError::IneligibleTier { part: part.clone() });
        }

        if self.exclusive_group.contains(part) {
            let others: Vec<PartName> = self
                .exclusive_group
                .iter()
                .filter(|member| *member != part)
                .cloned()
                .collect();
            for other in &others {
                self.revoke_drag_eligibility(other)?;
            }
        }

        self.layer_mut(part)?.set_drag_eligible(true);
        self.drag_active = Some(part.clone());
        tracing::debug!(part = %part, "drag active");
        Ok(())
    }

    /// Clears the part's eligibility. If it was drag-active, no layer is.
    pub fn revoke_drag_eligibility(&mut self, part: &PartName) -> Result<()> {
        if !self.layer(part)?.is_drag_eligible() && !self.is_responsive(part) {
            return Ok(());
        }

        self.layer_mut(part)?.set_drag_eligible(false);
        if self.is_responsive(part) {
            self.drag_active = None;
            tracing::debug!(part = %part, "drag inactive");
        }
        Ok(())
    }

    /// Applies a checkbox toggle: `true` requests eligibility, `false` revokes it.
    pub fn set_drag_eligibility(&mut self, part: &PartName, enabled: bool) -> Result<()> {
        if enabled {
            self.request_drag_eligibility(part)
        } else {
            self.revoke_drag_eligibility(part)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PartSpec;

    fn stack() -> LayerStack {
        LayerStack::new(&MascotConfig::default())
    }

    fn left() -> PartName {
        PartName::new("left-arm")
    }

    fn right() -> PartName {
        PartName::new("right-arm")
    }

    #[test]
    fn all_layers_start_neutral_and_idle() {
        let stack = stack();
        assert_eq!(stack.layers().len(), 5);
        assert!(stack.layers().iter().all(|l| l.tier() == Tier::Neutral));
        assert!(stack.drag_active().is_none());
    }

    #[test]
    fn stacks_have_distinct_ids() {
        let first = stack();
        let second = stack();
        let copy = first.clone();

        assert_ne!(first.id(), second.id());
        assert_ne!(first.id(), copy.id());
        assert_eq!(copy.revision(), first.revision());
        assert_eq!(copy.layers(), first.layers());
    }

    #[test]
    fn cycle_tier_rotates() {
        let mut stack = stack();
        let head = PartName::new("head");

        let tiers: Vec<Tier> = (0..4).map(|_| stack.cycle_tier(&head).unwrap().to).collect();
        assert_eq!(tiers, vec![Tier::Front, Tier::Back, Tier::Neutral, Tier::Front]);
    }

    #[test]
    fn back_tier_refuses_eligibility() {
        let mut stack = stack();
        stack.set_tier(&left(), Tier::Back).unwrap();
        stack.request_drag_eligibility(&right()).unwrap();
        let revision = stack.revision();

        let err = stack.request_drag_eligibility(&left()).unwrap_err();

        assert!(matches!(err, MascotError::IneligibleTier { part } if part == left()));
        assert_eq!(stack.drag_active(), Some(&right()));
        assert!(stack.layer(&right()).unwrap().is_drag_eligible());
        assert!(!stack.layer(&left()).unwrap().is_drag_eligible());
        assert_eq!(stack.revision(), revision);
    }

    #[test]
    fn arms_are_mutually_exclusive() {
        let mut stack = stack();

        stack.request_drag_eligibility(&left()).unwrap();
        stack.request_drag_eligibility(&right()).unwrap();
        assert!(!stack.layer(&left()).unwrap().is_drag_eligible());
        assert!(stack.layer(&right()).unwrap().is_drag_eligible());
        assert!(stack.is_responsive(&right()));
        assert!(!stack.is_responsive(&left()));

        stack.request_drag_eligibility(&left()).unwrap();
        assert!(stack.layer(&left()).unwrap().is_drag_eligible());
        assert!(!stack.layer(&right()).unwrap().is_drag_eligible());
    }

    #[test]
    fn non_group_part_takes_active_slot_only() {
        let mut stack = stack();
        let head = PartName::new("head");

        stack.request_drag_eligibility(&left()).unwrap();
        stack.request_drag_eligibility(&head).unwrap();

        assert_eq!(stack.drag_active(), Some(&head));
        assert!(stack.layer(&left()).unwrap().is_drag_eligible());
        assert!(!stack.is_responsive(&left()));
    }

    #[test]
    fn cycling_into_back_demotes() {
        let mut stack = stack();
        stack.request_drag_eligibility(&left()).unwrap();

        let change = stack.cycle_tier(&left()).unwrap();
        assert_eq!(change.to, Tier::Front);
        assert!(change.demoted.is_none());
        assert!(stack.is_responsive(&left()));

        let change = stack.cycle_tier(&left()).unwrap();
        assert_eq!(change.to, Tier::Back);
        assert!(matches!(
            change.demoted,
            Some(Notice::MovementDisabled { ref part, .. }) if *part == left()
        ));
        assert!(!stack.layer(&left()).unwrap().is_drag_eligible());
        assert!(stack.drag_active().is_none());
    }

    #[test]
    fn direct_tier_change_also_demotes() {
        let mut stack = stack();
        stack.request_drag_eligibility(&right()).unwrap();

        let change = stack.set_tier(&right(), Tier::Back).unwrap();
        assert!(change.demoted.is_some());
        assert!(!stack.layer(&right()).unwrap().is_drag_eligible());
    }

    #[test]
    fn demoting_an_inactive_eligible_layer_keeps_active_slot() {
        let mut stack = stack();
        let head = PartName::new("head");
        stack.request_drag_eligibility(&left()).unwrap();
        stack.request_drag_eligibility(&head).unwrap();

        let change = stack.set_tier(&left(), Tier::Back).unwrap();
        assert!(change.demoted.is_some());
        assert_eq!(stack.drag_active(), Some(&head));
    }

    #[test]
    fn back_tier_without_eligibility_is_silent() {
        let mut stack = stack();
        let change = stack.set_tier(&left(), Tier::Back).unwrap();
        assert!(change.demoted.is_none());
    }

    #[test]
    fn revoke_clears_active_slot() {
        let mut stack = stack();
        stack.set_drag_eligibility(&left(), true).unwrap();
        stack.set_drag_eligibility(&left(), false).unwrap();
        assert!(stack.drag_active().is_none());
        assert!(!stack.layer(&left()).unwrap().is_drag_eligible());
    }

    #[test]
    fn stacking_order_is_stable_within_tier() {
        let config = MascotConfig::with_parts(vec![
            PartSpec::new("a", 1),
            PartSpec::new("b", 1),
            PartSpec::new("c", 1),
            PartSpec::new("d", 1),
        ]);
        let mut stack = LayerStack::new(&config);
        stack.set_tier(&"c".into(), Tier::Back).unwrap();
        stack.set_tier(&"a".into(), Tier::Front).unwrap();

        let order: Vec<&str> = stack
            .stacking_order()
            .into_iter()
            .map(|l| l.part().as_str())
            .collect();
        assert_eq!(order, vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn unknown_part_errors() {
        let mut stack = stack();
        assert!(matches!(
            stack.cycle_tier(&"tail".into()),
            Err(MascotError::UnknownPart { .. })
        ));
        assert!(stack.request_drag_eligibility(&"tail".into()).is_err());
    }
}
