//! Suffix array over a byte string
//!
//! Every occurrence of a pattern is a prefix of some suffix, and all suffixes
//! sharing a prefix are adjacent once sorted, so a lookup is two binary
//! searches over the sorted suffix offsets.
//!
//! Construction is prefix doubling: after round `k` every suffix is ranked by
//! its first `2^k` bytes, and the next round orders suffixes by the pair of
//! ranks at `i` and `i + 2^k` with two stable counting sorts. Each round is
//! linear, so the build costs `O(n log n)` however repetitive the text is.

/// Sorted suffix offsets of a byte string
pub struct SuffixIndex {
    data: Vec<u8>,
    suffixes: Vec<usize>,
}

impl SuffixIndex {
    pub fn new(data: Vec<u8>) -> Self {
        let suffixes = build_suffix_array(&data);
        Self { data, suffixes }
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Offsets of every occurrence of `pattern`, in ascending text order,
    /// truncated to the first `limit` when given. An empty pattern matches nothing.
    pub fn lookup(&self, pattern: &[u8], limit: Option<usize>) -> Vec<usize> {
        if pattern.is_empty() {
            return Vec::new();
        }

        let start = self
            .suffixes
            .partition_point(|&offset| &self.data[offset..] < pattern);
        let count = self.suffixes[start..]
            .partition_point(|&offset| self.data[offset..].starts_with(pattern));

        let mut offsets = self.suffixes[start..start + count].to_vec();
        offsets.sort_unstable();
        if let Some(limit) = limit {
            offsets.truncate(limit);
        }
        offsets
    }
}

fn build_suffix_array(data: &[u8]) -> Vec<usize> {
    let n = data.len();
    if n == 0 {
        return Vec::new();
    }

    let mut rank: Vec<usize> = data.iter().map(|&b| usize::from(b)).collect();
    let mut classes = 256;
    let mut suffixes: Vec<usize> = (0..n).collect();
    let mut scratch = vec![0; n];
    let mut next_rank = vec![0; n];

    let mut step = 1;
    loop {
        // Rank 0 of the second key is the end of the text, which sorts first
        let second = |i: usize| if i + step < n { rank[i + step] + 1 } else { 0 };

        counting_sort(&suffixes, &mut scratch, classes + 1, second);
        counting_sort(&scratch, &mut suffixes, classes, |i| rank[i]);

        next_rank[suffixes[0]] = 0;
        for pair in suffixes.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            let same = rank[prev] == rank[cur] && second(prev) == second(cur);
            next_rank[cur] = next_rank[prev] + usize::from(!same);
        }
        std::mem::swap(&mut rank, &mut next_rank);

        classes = rank[suffixes[n - 1]] + 1;
        if classes == n {
            break;
        }
        step *= 2;
    }

    suffixes
}

/// Stable sort of `input` into `output` by a key in `0..buckets`
fn counting_sort(input: &[usize], output: &mut [usize], buckets: usize, key: impl Fn(usize) -> usize) {
    let mut starts = vec![0; buckets + 1];
    for &i in input {
        starts[key(i) + 1] += 1;
    }
    for b in 0..buckets {
        starts[b + 1] += starts[b];
    }
    for &i in input {
        let slot = &mut starts[key(i)];
        output[*slot] = i;
        *slot += 1;
    }
}
