use num_bigint::BigUint;

/// Receives one sample per simulated block.
///
/// Purely a side channel: the simulation never reads anything back.
pub trait TelemetrySink {
    fn record(&mut self, height: u64, difficulty: &BigUint, live_bees: usize, extra_solvers: u32);
}

impl<F> TelemetrySink for F
where
    F: FnMut(u64, &BigUint, usize, u32),
{
    fn record(&mut self, height: u64, difficulty: &BigUint, live_bees: usize, extra_solvers: u32) {
        self(height, difficulty, live_bees, extra_solvers)
    }
}

/// One telemetry sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSample {
    pub height: u64,
    pub difficulty: BigUint,
    pub live_bees: usize,
    /// Solvers beyond the one needed to mine the block.
    pub extra_solvers: u32,
}

/// Sink that keeps every sample in memory.
#[derive(Debug, Default, Clone)]
pub struct TelemetryLog {
    pub samples: Vec<BlockSample>,
}

impl TelemetryLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TelemetrySink for TelemetryLog {
    fn record(&mut self, height: u64, difficulty: &BigUint, live_bees: usize, extra_solvers: u32) {
        self.samples.push(BlockSample {
            height,
            difficulty: difficulty.clone(),
            live_bees,
            extra_solvers,
        });
    }
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTelemetry;

impl TelemetrySink for NoTelemetry {
    fn record(&mut self, _: u64, _: &BigUint, _: usize, _: u32) {}
}
