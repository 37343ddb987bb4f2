//! Append-only destinations for per-energy samples.

use serde::Serialize;
use std::io::{self, BufWriter, Write};

/// One grid point as it leaves the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RawSample {
    pub w: f64,
    pub energy_kev: f64,
    pub rate: f64,
    pub neutrino_rate: f64,
}

pub trait RawSampleSink {
    fn emit(&mut self, sample: &RawSample) -> io::Result<()>;

    /// Called once after the last sample of a run.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Tab-separated rows `W  E[keV]  rate  neutrino_rate`, flushed on [`finish`](RawSampleSink::finish).
#[derive(Debug)]
pub struct BufferedRawSink<W: Write> {
    writer: BufWriter<W>,
    rows: usize,
}

impl<W: Write> BufferedRawSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
            rows: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes and returns the wrapped writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|error| error.into_error())
    }
}

impl<W: Write> RawSampleSink for BufferedRawSink<W> {
    fn emit(&mut self, sample: &RawSample) -> io::Result<()> {
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}",
            sample.w, sample.energy_kev, sample.rate, sample.neutrino_rate
        )?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Keeps every sample in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectingSink {
    samples: Vec<RawSample>,
    finished: bool,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[RawSample] {
        &self.samples
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl RawSampleSink for CollectingSink {
    fn emit(&mut self, sample: &RawSample) -> io::Result<()> {
        self.samples.push(*sample);
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.finished = true;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscardSink;

impl RawSampleSink for DiscardSink {
    fn emit(&mut self, _sample: &RawSample) -> io::Result<()> {
        Ok(())
    }
}
