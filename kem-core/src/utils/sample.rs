/// Seeded SplitMix64 stream for generated-input tests. The same seed always
/// yields the same inputs, so a failure names its case exactly.
pub struct Sampler {
    state: u64,
}

impl Sampler {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);

        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);

        z ^ (z >> 31)
    }

    /// Uniform in `0..bound`; `bound` must be positive.
    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

/// Every string over `alphabet` with length `1..=max_len`, shortest first.
pub fn all_strings(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut all = vec![];
    let mut previous = vec![String::new()];

    for _ in 0..max_len {
        let current = previous.iter()
            .flat_map(|prefix| alphabet.iter().map(move |ch| format!("{prefix}{ch}")))
            .collect::<Vec<_>>();

        all.extend(current.iter().cloned());
        previous = current;
    }

    all
}
