use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RamBlock {
    pub sections: u8,
    pub section_size: u32,
}

/// Physical RAM organisation: consecutive blocks, each split into
/// individually powered sections.
#[derive(Clone, Copy, Debug)]
pub struct RamLayout {
    pub base: u32,
    pub blocks: &'static [RamBlock],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RamRegion {
    pub start: u32,
    pub size: u32,
}

const SMALL: RamBlock = RamBlock {
    sections: 2,
    section_size: 0x1000,
};

const LARGE: RamBlock = RamBlock {
    sections: 6,
    section_size: 0x8000,
};

impl RamLayout {
    /// RAM0..RAM7 with 2 x 4 KiB sections, RAM8 with 6 x 32 KiB sections.
    pub const NRF52840: RamLayout = RamLayout {
        base: 0x2000_0000,
        blocks: &[SMALL, SMALL, SMALL, SMALL, SMALL, SMALL, SMALL, SMALL, LARGE],
    };

    pub const fn size(&self) -> u32 {
        let mut size = 0;
        let mut i = 0;
        while i < self.blocks.len() {
            size += self.blocks[i].sections as u32 * self.blocks[i].section_size;
            i += 1;
        }
        size
    }

    pub const fn region(&self) -> RamRegion {
        RamRegion {
            start: self.base,
            size: self.size(),
        }
    }

    /// `(block, section mask)` for every block with a section overlapping the
    /// given range. Sections past the 32nd of a block do not fit the mask and
    /// are never reported.
    pub fn sections(&self, region: RamRegion) -> impl Iterator<Item = (usize, u32)> + '_ {
        let start = region.start as u64;
        let end = start + region.size as u64;
        let mut addr = self.base as u64;

        self.blocks.iter().enumerate().filter_map(move |(index, block)| {
            let mut mask = 0u32;
            for section in 0..block.sections {
                let lo = addr;
                let hi = addr + block.section_size as u64;
                addr = hi;
                if lo < end && start < hi {
                    mask |= 1u32.checked_shl(section as u32).unwrap_or(0);
                }
            }
            (mask != 0).then_some((index, mask))
        })
    }
}

/// Per-section RAM power control.
pub trait RamPower: Sync {
    fn layout(&self) -> &RamLayout;

    /// Powers on the sections in `sections` (bit n = section n) of `block`.
    fn power_on(&self, block: usize, sections: u32);
}

/// Keeps every section covering `region` powered through the next reset.
/// Returns the number of blocks touched.
pub fn keep_powered(ram: &dyn RamPower, region: RamRegion) -> usize {
    let mut blocks = 0;
    for (block, mask) in ram.layout().sections(region) {
        debug!("RAM{block}: power on sections {mask:#06x}");
        ram.power_on(block, mask);
        blocks += 1;
    }
    blocks
}
