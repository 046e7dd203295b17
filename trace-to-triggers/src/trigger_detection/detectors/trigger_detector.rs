use super::{Assembler, Detector, Real};
use crate::trigger_detection::trigger::{TimeValue, Trigger};
use std::fmt::Display;
use tracing::warn;

/// Which threshold crossing an event marks.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    #[default]
    Onset,
    Offset,
}

impl Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Onset => "on",
            Self::Offset => "off",
        })
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Data {
    class: Class,
    value: Real,
}

impl Data {
    pub fn get_class(&self) -> Class {
        self.class
    }

    pub fn get_value(&self) -> Real {
        self.value
    }
}

impl Display for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{0},{1}", self.class, self.value))
    }
}

pub type TriggerEvent = (Real, Data);

#[derive(Default, Debug, Clone, PartialEq)]
enum State {
    #[default]
    Quiet,
    Triggered,
}

/// Two-threshold trigger machine over a characteristic function.
///
/// Arms when the value reaches `threshold_on`, emitting an onset event,
/// and disarms when the value next drops below `threshold_off`, emitting
/// an offset event. `threshold_on` is expected to exceed `threshold_off`;
/// the degenerate ordering still runs but re-arms on the sample after
/// every offset, so it is only warned about.
#[derive(Default, Clone)]
pub struct TriggerDetector {
    threshold_on: Real,
    threshold_off: Real,
    state: State,
}

impl TriggerDetector {
    pub fn new(threshold_on: Real, threshold_off: Real) -> Self {
        if threshold_on <= threshold_off {
            warn!(
                "threshold_on ({threshold_on}) does not exceed threshold_off ({threshold_off}), \
                triggers will re-arm immediately"
            );
        }
        Self {
            threshold_on,
            threshold_off,
            state: State::Quiet,
        }
    }
}

impl Detector for TriggerDetector {
    type EventType = TriggerEvent;

    fn signal(&mut self, time: Real, value: Real) -> Option<TriggerEvent> {
        match self.state {
            State::Quiet => (value >= self.threshold_on).then(|| {
                self.state = State::Triggered;
                (
                    time,
                    Data {
                        class: Class::Onset,
                        value,
                    },
                )
            }),
            State::Triggered => (value < self.threshold_off).then(|| {
                self.state = State::Quiet;
                (
                    time,
                    Data {
                        class: Class::Offset,
                        value,
                    },
                )
            }),
        }
    }
}

/// Pairs each onset event with the following offset. An onset still
/// pending when the trace ends is dropped: there is no offset evidence
/// to close it with.
#[derive(Default, Clone)]
pub struct TriggerAssembler {
    pending: Option<TimeValue>,
}

impl Assembler for TriggerAssembler {
    type DetectorType = TriggerDetector;

    fn assemble(&mut self, event: TriggerEvent) -> Option<Trigger> {
        let (time, data) = event;
        match data.get_class() {
            Class::Onset => {
                self.pending = Some(TimeValue {
                    time,
                    value: data.get_value(),
                });
                None
            }
            Class::Offset => self.pending.take().map(|onset| Trigger {
                onset,
                offset: TimeValue {
                    time,
                    value: data.get_value(),
                },
            }),
        }
    }
}
