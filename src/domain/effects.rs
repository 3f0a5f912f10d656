//! Notification target for state transitions.
//!
//! The simulation reports every birth and death it causes, whether by stepping
//! or by editing, and every pattern load. Renderers and audio players implement
//! [`EffectSink`]; the simulation never waits on them.

use super::{Cell, PatternId};

pub trait EffectSink {
    fn on_birth(&mut self, cell: Cell);
    fn on_death(&mut self, cell: Cell);
    fn on_pattern_loaded(&mut self, pattern: PatternId);
}

/// Sink that ignores everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EffectSink for NullSink {
    fn on_birth(&mut self, _cell: Cell) {}
    fn on_death(&mut self, _cell: Cell) {}
    fn on_pattern_loaded(&mut self, _pattern: PatternId) {}
}

impl<S: EffectSink + ?Sized> EffectSink for &mut S {
    fn on_birth(&mut self, cell: Cell) {
        (**self).on_birth(cell);
    }

    fn on_death(&mut self, cell: Cell) {
        (**self).on_death(cell);
    }

    fn on_pattern_loaded(&mut self, pattern: PatternId) {
        (**self).on_pattern_loaded(pattern);
    }
}

/// Fan out to two sinks, first then second
impl<A: EffectSink, B: EffectSink> EffectSink for (A, B) {
    fn on_birth(&mut self, cell: Cell) {
        self.0.on_birth(cell);
        self.1.on_birth(cell);
    }

    fn on_death(&mut self, cell: Cell) {
        self.0.on_death(cell);
        self.1.on_death(cell);
    }

    fn on_pattern_loaded(&mut self, pattern: PatternId) {
        self.0.on_pattern_loaded(pattern);
        self.1.on_pattern_loaded(pattern);
    }
}

/// A disabled sink is `None`
impl<S: EffectSink> EffectSink for Option<S> {
    fn on_birth(&mut self, cell: Cell) {
        if let Some(sink) = self {
            sink.on_birth(cell);
        }
    }

    fn on_death(&mut self, cell: Cell) {
        if let Some(sink) = self {
            sink.on_death(cell);
        }
    }

    fn on_pattern_loaded(&mut self, pattern: PatternId) {
        if let Some(sink) = self {
            sink.on_pattern_loaded(pattern);
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EffectEvent {
    Birth(Cell),
    Death(Cell),
    PatternLoaded(PatternId),
}

/// Sink that records events in arrival order
#[derive(Clone, Debug, Default)]
pub struct EffectLog {
    pub events: Vec<EffectEvent>,
}

impl EffectLog {
    pub fn births(&self) -> impl Iterator<Item = Cell> + '_ {
        self.events.iter().filter_map(|e| match e {
            EffectEvent::Birth(c) => Some(*c),
            _ => None,
        })
    }

    pub fn deaths(&self) -> impl Iterator<Item = Cell> + '_ {
        self.events.iter().filter_map(|e| match e {
            EffectEvent::Death(c) => Some(*c),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EffectSink for EffectLog {
    fn on_birth(&mut self, cell: Cell) {
        self.events.push(EffectEvent::Birth(cell));
    }

    fn on_death(&mut self, cell: Cell) {
        self.events.push(EffectEvent::Death(cell));
    }

    fn on_pattern_loaded(&mut self, pattern: PatternId) {
        self.events.push(EffectEvent::PatternLoaded(pattern));
    }
}
