//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use sir_agent::Topography;
use sir_core::Tick;
use sir_model::{Group, GroupModel, SirGroup, SirType};
use sir_sim::SimObserver;

use crate::row::{GroupCountRow, PedestrianGroupRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every pedestrian's group and the compartment
/// sizes at each snapshot to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn snapshot<M>(&mut self, tick: Tick, t: f64, topography: &Topography, model: &M) -> OutputResult<()>
    where
        M: GroupModel<Group = SirGroup>,
    {
        let rows = topography
            .pedestrians()
            .map(|p| -> OutputResult<PedestrianGroupRow> {
                let group = model.get_group(p.id)?;
                Ok(PedestrianGroupRow {
                    pedestrian_id: p.id.0,
                    tick:          tick.0,
                    sim_time_secs: t,
                    group_id:      group.id().0,
                })
            })
            .collect::<OutputResult<Vec<_>>>()?;
        if !rows.is_empty() {
            self.writer.write_groups(&rows)?;
        }

        let size = |kind: SirType| {
            model
                .groups_by_id()
                .get(&kind.group_id())
                .map_or(0, |g| g.size() as u64)
        };
        self.writer.write_counts(&GroupCountRow {
            tick:          tick.0,
            sim_time_secs: t,
            susceptible:   size(SirType::Susceptible),
            infected:      size(SirType::Infected),
            recovered:     size(SirType::Recovered),
        })
    }
}

impl<W, M> SimObserver<M> for SimOutputObserver<W>
where
    W: OutputWriter,
    M: GroupModel<Group = SirGroup>,
{
    fn on_snapshot(&mut self, tick: Tick, sim_time_secs: f64, topography: &Topography, model: &M) {
        let result = self.snapshot(tick, sim_time_secs, topography, model);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
