/// Handle to one execution group of lockstep lanes.
///
/// A `SubGroup` can only be obtained inside [`SubGroup::scope`], and every
/// [`TileMacEngine`](crate::TileMacEngine) operation requires one. Tile
/// operations are therefore only ever issued from group-level code, once per
/// group, with the same arguments for every lane. Per-lane branching around
/// engine calls is not expressible through this handle.
#[derive(Debug)]
pub struct SubGroup {
    id: (usize, usize),
    width: usize,
}

impl SubGroup {
    /// Run `f` as the body of the group `id` with `width` lanes.
    ///
    /// The handle is borrowed by the closure and cannot escape it.
    pub fn scope<R>(id: (usize, usize), width: usize, f: impl FnOnce(&SubGroup) -> R) -> R {
        let group = SubGroup { id, width };
        log::trace!("group {:?}: enter ({} lanes)", group.id, group.width);
        let out = f(&group);
        log::trace!("group {:?}: leave", group.id);
        out
    }

    /// Grid coordinate `(tile_row, tile_col)` this group works on.
    pub fn id(&self) -> (usize, usize) {
        self.id
    }

    /// Number of lanes executing in lockstep.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Lane indices `0..width`.
    pub fn lanes(&self) -> std::ops::Range<usize> {
        0..self.width
    }
}
