/// Fill calculates minimum, maximum, average and percentile of block
/// occupancy in a block-list instance, as a percentage of the
/// configured block capacity.
#[derive(Clone)]
pub struct Fill {
    samples: usize,
    min: usize,
    max: usize,
    total: usize,
    fills: [u64; 101],
}

impl Fill {
    pub(crate) fn new() -> Fill {
        Default::default()
    }

    pub(crate) fn sample(&mut self, pct: usize) {
        self.samples += 1;
        self.total += pct;
        if self.samples == 1 || pct < self.min {
            self.min = pct
        }
        if self.samples == 1 || pct > self.max {
            self.max = pct
        }
        self.fills[pct] += 1;
    }

    /// Return number of blocks sampled.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Return the occupancy of the emptiest block, in percent.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Return the occupancy of the fullest block, in percent.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Return the average block occupancy, in percent.
    pub fn mean(&self) -> usize {
        if self.samples == 0 {
            0
        } else {
            self.total / self.samples
        }
    }

    /// Return occupancy as tuple of percentiles, each tuple provides
    /// (percentile, occupancy). Returned percentiles from 90, 91 .. 99
    pub fn percentiles(&self) -> Vec<(u8, usize)> {
        let mut percentiles: Vec<(u8, usize)> = vec![];
        let (mut acc, mut prev_perc) = (0_u64, 90_u8);
        let iter = self.fills.iter().enumerate().filter(|(_, &item)| item > 0);
        for (pct, samples) in iter {
            acc += *samples;
            let perc = ((acc as f64 / self.samples as f64) * 100_f64) as u8;
            if perc >= prev_perc {
                percentiles.push((perc, pct));
                prev_perc = perc;
            }
        }
        percentiles
    }

    /// Pretty print occupancy statistics in human readable format,
    /// useful in logs.
    pub fn pretty_print(&self, prefix: &str) {
        let mean = self.mean();
        println!(
            "{}fill% (min, mean, max): {:?}",
            prefix,
            (self.min, mean, self.max)
        );
        for (perc, pct) in self.percentiles().into_iter() {
            println!("{}  {} percentile = {}", prefix, perc, pct);
        }
    }

    /// Convert occupancy statistics to JSON format, useful for
    /// plotting.
    pub fn json(&self) -> String {
        let ps: Vec<String> = self
            .percentiles()
            .into_iter()
            .map(|(perc, pct)| format!("{}: {}", perc, pct))
            .collect();
        let strs = [
            format!("min: {}", self.min),
            format!("mean: {}", self.mean()),
            format!("max: {}", self.max),
            format!("percentiles: {}", ps.join(", ")),
        ];
        ("{ ".to_string() + strs.join(", ").as_str() + " }").to_string()
    }
}

impl Default for Fill {
    fn default() -> Self {
        Fill {
            samples: 0,
            min: 0,
            max: 0,
            total: 0,
            fills: [0; 101],
        }
    }
}
