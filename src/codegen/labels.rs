// Label and stack slot counters for the code generator

/// Bytes per stack slot
pub const SLOT_SIZE: u32 = 4;

/// Produces label pairs that are unique across the whole program.
///
/// Pairs are handed out before any branch body is emitted, so nested and
/// sibling constructs never share a name.
#[derive(Debug, Default)]
pub struct LabelGenerator {
    next: usize,
}

impl LabelGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(<kind>_<n>, exit_<kind>_<n>)` for a fresh `n`
    pub fn next_pair(&mut self, kind: &str) -> (String, String) {
        let n = self.next;
        self.next += 1;
        (format!("{}_{}", kind, n), format!("exit_{}_{}", kind, n))
    }
}

/// Hands out `[EBP - offset]` slots for one stack frame, in declaration order
#[derive(Debug, Default)]
pub struct OffsetAllocator {
    used: u32,
}

impl OffsetAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> u32 {
        self.used += SLOT_SIZE;
        self.used
    }

    /// Bytes reserved so far
    pub fn frame_size(&self) -> u32 {
        self.used
    }
}
