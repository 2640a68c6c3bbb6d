//! Tiered wiring: the collection of hash-consed tables forming the node
//! tiers, plus the recursion that materializes a macrocell's future.

use log::{debug, info};

use crate::config::Config;
use crate::error::HashlifeError;

use super::cell_block::CellBlock;
use super::hashset::DenseHashSet;
use super::macrocell::Macrocell;
use super::node_ptr::NodePtr;

/// A Hashlife universe: tier 0 is a hash-consing set of base cell blocks,
/// tier `n >= 1` is a hash-consing set of macrocells whose children are
/// tier-`(n - 1)` pointers.
pub struct Universe {
    config: Config,
    base: DenseHashSet<CellBlock>,
    tiers: Vec<DenseHashSet<Macrocell>>,
}

impl Universe {
    /// Builds a universe from the given capacities.
    pub fn new(config: Config) -> Result<Self, HashlifeError> {
        config.validate()?;
        debug!(
            "constructing universe: arena_capacity={}, tier_capacity={}",
            config.arena_capacity, config.tier_capacity
        );
        Ok(Universe {
            base: DenseHashSet::new(config.tier_capacity, config.arena_capacity)?,
            tiers: Vec::new(),
            config,
        })
    }

    fn ensure_tier(&mut self, tier: usize) -> Result<(), HashlifeError> {
        while self.tiers.len() < tier {
            self.tiers.push(DenseHashSet::new(
                self.config.tier_capacity,
                self.config.arena_capacity,
            )?);
        }
        Ok(())
    }

    /// Interns a base cell block, returning its tier-0 pointer.
    pub fn intern_cell(&mut self, block: CellBlock) -> Result<NodePtr, HashlifeError> {
        let (index, _) = self.base.emplace(block);
        index
            .map(|i| NodePtr::new(i as u32))
            .ok_or(HashlifeError::TableSaturated { tier: 0 })
    }

    /// Interns a macrocell at `tier` (`tier >= 1`) from its four children,
    /// returning its pointer within that tier's table.
    pub fn intern_macrocell(
        &mut self,
        tier: usize,
        nw: NodePtr,
        ne: NodePtr,
        sw: NodePtr,
        se: NodePtr,
    ) -> Result<NodePtr, HashlifeError> {
        debug_assert!(tier >= 1);
        self.ensure_tier(tier)?;
        let (index, _) = self.tiers[tier - 1].emplace(Macrocell::new(nw, ne, sw, se));
        index
            .map(|i| NodePtr::new(i as u32))
            .ok_or(HashlifeError::TableSaturated { tier })
    }

    fn base_of(&self, ptr: NodePtr) -> CellBlock {
        *self
            .base
            .get(ptr.index() as usize)
            .expect("tier-0 pointer must reference an occupied slot")
    }

    fn macrocell_of(&self, tier: usize, ptr: NodePtr) -> &Macrocell {
        self.tiers[tier - 1]
            .get(ptr.index() as usize)
            .expect("macrocell pointer must reference an occupied slot")
    }

    fn children(&self, tier: usize, ptr: NodePtr) -> (NodePtr, NodePtr, NodePtr, NodePtr) {
        let mc = self.macrocell_of(tier, ptr);
        (mc.nw(), mc.ne(), mc.sw(), mc.se())
    }

    /// Resets every tier (including tier 0) to empty. All previously
    /// handed-out pointers become logically invalid.
    pub fn reset(&mut self) {
        info!(
            "resetting universe: clearing tier 0 and {} higher tiers",
            self.tiers.len()
        );
        self.base.clear();
        for tier in self.tiers.iter_mut() {
            tier.clear();
        }
    }

    /// The one-generation successor of the central region of the
    /// macrocell at `tier` pointed to by `ptr`.
    pub fn step(&mut self, tier: usize, ptr: NodePtr) -> Result<NodePtr, HashlifeError> {
        debug_assert!(tier >= 1);
        if let Some(memo) = self.memoized_step(tier, ptr) {
            return Ok(memo);
        }
        let result = self.compute_step(tier, ptr)?;
        self.macrocell_of(tier, ptr).set_step(result);
        Ok(result)
    }

    fn memoized_step(&self, tier: usize, ptr: NodePtr) -> Option<NodePtr> {
        let memo = self.macrocell_of(tier, ptr).step();
        (!memo.is_null()).then_some(memo)
    }

    fn compute_step(&mut self, tier: usize, ptr: NodePtr) -> Result<NodePtr, HashlifeError> {
        let (nw, ne, sw, se) = self.children(tier, ptr);
        if tier == 1 {
            let center = CellBlock::center(
                self.base_of(nw),
                self.base_of(ne),
                self.base_of(sw),
                self.base_of(se),
            );
            return self.intern_cell(center.step());
        }
        let child_tier = tier - 1;
        let regions = self.synthesize_regions(child_tier, nw, ne, sw, se)?;

        let mut futures = [NodePtr::NULL; 9];
        for (i, region) in regions.iter().enumerate() {
            futures[i] = self.step(child_tier, *region)?;
        }
        let futures_tier = if child_tier == 1 { 0 } else { child_tier };
        let quadrants = self.combine_quadrant(futures_tier, &futures)?;
        self.intern_macrocell(tier, quadrants[0], quadrants[1], quadrants[2], quadrants[3])
    }

    /// The jump-step successor of the macrocell at `tier` pointed to by
    /// `ptr` (`tier >= 2`), two generations ahead of `ptr`'s center — the
    /// same fixed advance as the tier-1 base case, reached through one
    /// recursive call per synthesized region rather than a tier-scaling
    /// number of generations.
    pub fn next(&mut self, tier: usize, ptr: NodePtr) -> Result<NodePtr, HashlifeError> {
        debug_assert!(tier >= 1);
        if let Some(memo) = self.memoized_next(tier, ptr) {
            return Ok(memo);
        }
        let result = self.compute_next(tier, ptr)?;
        self.macrocell_of(tier, ptr).set_next(result);
        Ok(result)
    }

    fn memoized_next(&self, tier: usize, ptr: NodePtr) -> Option<NodePtr> {
        let memo = self.macrocell_of(tier, ptr).next();
        (!memo.is_null()).then_some(memo)
    }

    fn compute_next(&mut self, tier: usize, ptr: NodePtr) -> Result<NodePtr, HashlifeError> {
        let (nw, ne, sw, se) = self.children(tier, ptr);
        if tier == 1 {
            let center = CellBlock::center(
                self.base_of(nw),
                self.base_of(ne),
                self.base_of(sw),
                self.base_of(se),
            );
            return self.intern_cell(center.next());
        }

        let child_tier = tier - 1;
        let regions = self.synthesize_regions(child_tier, nw, ne, sw, se)?;

        let mut futures = [NodePtr::NULL; 9];
        for (i, region) in regions.iter().enumerate() {
            futures[i] = self.next(child_tier, *region)?;
        }
        let futures_tier = if child_tier == 1 { 0 } else { child_tier };
        let quadrants = self.combine_quadrant(futures_tier, &futures)?;
        self.intern_macrocell(tier, quadrants[0], quadrants[1], quadrants[2], quadrants[3])
    }

    /// Builds the nine tier-`child_tier` sub-regions of a tier-`(child_tier
    /// + 1)` node from its four children: the four originals plus the
    /// five half-overlap regions obtained by stitching halves of
    /// grandchildren.
    fn synthesize_regions(
        &mut self,
        child_tier: usize,
        nw: NodePtr,
        ne: NodePtr,
        sw: NodePtr,
        se: NodePtr,
    ) -> Result<[NodePtr; 9], HashlifeError> {
        let (_a_nw, a_ne, a_sw, a_se) = self.children(child_tier, nw);
        let (b_nw, _b_ne, b_sw, b_se) = self.children(child_tier, ne);
        let (c_nw, c_ne, _c_sw, c_se) = self.children(child_tier, sw);
        let (d_nw, d_ne, d_sw, _d_se) = self.children(child_tier, se);

        // Grandchildren are tier `child_tier - 1`; interning four of them
        // together builds a tier-`child_tier` node, matching `nw`..`se`.
        let north = self.intern_macrocell(child_tier, a_ne, b_nw, a_se, b_sw)?;
        let west = self.intern_macrocell(child_tier, a_sw, a_se, c_nw, c_ne)?;
        let center = self.intern_macrocell(child_tier, a_se, b_sw, c_ne, d_nw)?;
        let east = self.intern_macrocell(child_tier, b_sw, b_se, d_nw, d_ne)?;
        let south = self.intern_macrocell(child_tier, c_ne, d_nw, c_se, d_sw)?;

        Ok([nw, north, ne, west, center, east, sw, south, se])
    }

    /// Groups nine tier-`tier` pieces (arranged in the 3x3 order
    /// `synthesize_regions` returns) into the four tier-`(tier + 1)`
    /// quadrants of the region they tile.
    fn combine_quadrant(
        &mut self,
        tier: usize,
        nine: &[NodePtr; 9],
    ) -> Result<[NodePtr; 4], HashlifeError> {
        let [n00, n01, n02, n10, n11, n12, n20, n21, n22] = *nine;
        let result_tier = tier + 1;
        let nw = self.intern_macrocell(result_tier, n00, n01, n10, n11)?;
        let ne = self.intern_macrocell(result_tier, n01, n02, n11, n12)?;
        let sw = self.intern_macrocell(result_tier, n10, n11, n20, n21)?;
        let se = self.intern_macrocell(result_tier, n11, n12, n21, n22)?;
        Ok([nw, ne, sw, se])
    }
}
