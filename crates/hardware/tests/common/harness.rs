use r16sim_core::config::{Config, ReadTiming};
use r16sim_core::isa::Instruction;
use r16sim_core::isa::asm::assemble;
use r16sim_core::sim::{Oracle, Preload, Simulator, VerifyReport, verify};
use r16sim_core::Program;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once per test binary. `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builder for a program, its initial state and the configuration to run it under.
pub struct TestContext {
    pub config: Config,
    pub program: Program,
    pub preload: Preload,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        init_tracing();
        Self {
            config: Config::default(),
            program: Program::default(),
            preload: Preload::new(),
        }
    }

    /// Sets the program from decoded instructions.
    pub fn program(mut self, insts: &[Instruction]) -> Self {
        self.program = Program::from_instructions(insts);
        self
    }

    /// Sets the program from an already-built image.
    pub fn image(mut self, program: Program) -> Self {
        self.program = program;
        self
    }

    /// Sets the program from assembly source.
    pub fn asm(mut self, source: &str) -> Self {
        self.program = Program::new(assemble(source).expect("test program assembles"));
        self
    }

    pub fn reg(mut self, idx: usize, value: u16) -> Self {
        self.preload = self.preload.reg(idx, value);
        self
    }

    pub fn mem(mut self, base: u16, data: &[u16]) -> Self {
        self.preload = self.preload.mem(base, data);
        self
    }

    pub fn read_timing(mut self, timing: ReadTiming) -> Self {
        self.config.memory.read_timing = timing;
        self
    }

    pub fn data_words(mut self, words: usize, read_default: u16) -> Self {
        self.config.memory.data_words = words;
        self.config.memory.read_default = read_default;
        self
    }

    pub fn max_ticks(mut self, limit: u64) -> Self {
        self.config.general.max_ticks = limit;
        self
    }

    /// A reset simulator with the preload applied, not yet ticked.
    pub fn simulator(&self) -> Simulator {
        let mut sim = Simulator::new(&self.config, self.program.clone());
        self.preload.apply_to_sim(&mut sim);
        sim
    }

    /// Runs to drain and returns the simulator with the tick count.
    pub fn run(&self) -> (Simulator, u64) {
        let mut sim = self.simulator();
        let ticks = sim.run_until_drained().expect("pipeline drains");
        (sim, ticks)
    }

    /// An oracle with the preload applied, not yet stepped.
    pub fn oracle(&self) -> Oracle {
        let mut oracle = Oracle::new(&self.config);
        self.preload.apply_to_oracle(&mut oracle);
        oracle
    }

    /// Runs both models and asserts they agree.
    pub fn verify(&self) -> VerifyReport {
        verify(&self.program, &self.preload, &self.config).expect("pipeline matches oracle")
    }
}
