use std::cell::Cell;

use maskgen_core::errors::ErrorInfo;
use maskgen_core::{Engine, LinearSize, MaskError, ModelParameter};

/// Engine double whose snapshot is the number of sweeps performed so far.
///
/// The seed selects the sweep on which `advance` fails (`0` never fails).
#[derive(Debug)]
pub struct CountingEngine {
    pub advances: u64,
    pub snapshots: Cell<u64>,
    pub fail_on_advance: Option<u64>,
    pub fail_snapshot: bool,
}

impl CountingEngine {
    pub fn healthy() -> Self {
        Self {
            advances: 0,
            snapshots: Cell::new(0),
            fail_on_advance: None,
            fail_snapshot: false,
        }
    }
}

impl Engine for CountingEngine {
    const MODEL: &'static str = "counting";

    type Snapshot = u64;

    fn construct(
        seed: u64,
        _size: LinearSize,
        parameter: ModelParameter,
    ) -> Result<Self, MaskError> {
        if let ModelParameter::Value(value) = parameter {
            if value < 0.0 {
                return Err(MaskError::parameter(Self::MODEL, "value", value, "[0, inf)"));
            }
        }
        Ok(Self {
            fail_on_advance: (seed > 0).then_some(seed),
            ..Self::healthy()
        })
    }

    fn advance(&mut self) -> Result<(), MaskError> {
        if self.fail_on_advance == Some(self.advances + 1) {
            return Err(MaskError::Engine(
                ErrorInfo::new("injected", "advance failed")
                    .with_context("sweep", (self.advances + 1).to_string()),
            ));
        }
        self.advances += 1;
        Ok(())
    }

    fn snapshot(&self) -> Result<u64, MaskError> {
        self.snapshots.set(self.snapshots.get() + 1);
        if self.fail_snapshot {
            return Err(MaskError::Engine(ErrorInfo::new(
                "injected",
                "snapshot failed",
            )));
        }
        Ok(self.advances)
    }
}

#[allow(dead_code)]
pub fn size(length: u32) -> LinearSize {
    LinearSize::new(length).unwrap()
}
