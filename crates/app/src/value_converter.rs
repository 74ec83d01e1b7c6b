//! Built-in conversions between the state value types.

use hublink_domain::error::ValueError;
use hublink_domain::value::{
    OnOff, OpenClosed, Percent, PlayPause, Quantity, State, StateKind, Unit, UpDown,
};

use crate::ports::ValueConverter;

/// Stateless converter covering the numeric, switch-like and textual types.
///
/// - numbers: `Percent`, `Decimal`, `Quantity` magnitude, `ON`=1/`OFF`=0,
///   `OPEN`=1/`CLOSED`=0, `UP`=0/`DOWN`=100 (as a rollershutter position)
/// - percent: numbers in `0..=100`, `ON`=100/`OFF`=0, `UP`=0/`DOWN`=100
/// - on/off: any non-zero number is `ON`, `OPEN` is `ON`
/// - up/down: only the positions 0 and 100
/// - strings parse into whatever they spell
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicValueConverter;

impl ValueConverter for BasicValueConverter {
    fn convert(&self, state: &State, target: StateKind) -> Result<State, ValueError> {
        if state.kind() == target {
            return Ok(state.clone());
        }
        if let State::String(text) = state {
            if target == StateKind::String {
                return Ok(state.clone());
            }
            let parsed: State = match text.parse() {
                Ok(parsed) => parsed,
                Err(never) => match never {},
            };
            if parsed.kind() == StateKind::String {
                return Err(unsupported(state, target));
            }
            return self.convert(&parsed, target);
        }
        let converted = match target {
            StateKind::Decimal => number(state).map(State::Decimal),
            StateKind::Percent => percent(state)?.map(State::Percent),
            StateKind::Quantity => number(state).map(|v| match state {
                State::Percent(_) => State::Quantity(Quantity::new(v, Unit::Percent)),
                _ => State::Quantity(Quantity::dimensionless(v)),
            }),
            StateKind::OnOff => on_off(state).map(State::OnOff),
            StateKind::OpenClosed => on_off(state).map(|v| {
                State::OpenClosed(match v {
                    OnOff::On => OpenClosed::Open,
                    OnOff::Off => OpenClosed::Closed,
                })
            }),
            StateKind::UpDown => up_down(state).map(State::UpDown),
            StateKind::PlayPause => match state {
                State::OnOff(OnOff::On) => Some(State::PlayPause(PlayPause::Play)),
                State::OnOff(OnOff::Off) => Some(State::PlayPause(PlayPause::Pause)),
                _ => None,
            },
            StateKind::String => Some(State::String(state.to_string())),
            StateKind::RewindFastforward
            | StateKind::DateTime
            | StateKind::Undef
            | StateKind::Null => None,
        };
        converted.ok_or_else(|| unsupported(state, target))
    }
}

fn number(state: &State) -> Option<f64> {
    match state {
        State::Decimal(v) => Some(*v),
        State::Percent(p) => Some(p.value()),
        State::Quantity(q) => Some(q.value),
        State::OnOff(OnOff::On) | State::OpenClosed(OpenClosed::Open) => Some(1.0),
        State::OnOff(OnOff::Off) | State::OpenClosed(OpenClosed::Closed) => Some(0.0),
        State::UpDown(UpDown::Up) => Some(0.0),
        State::UpDown(UpDown::Down) => Some(100.0),
        _ => None,
    }
}

fn percent(state: &State) -> Result<Option<Percent>, ValueError> {
    Ok(match state {
        State::Decimal(v) => Some(Percent::new(*v)?),
        State::Quantity(q) if q.unit == Unit::Percent || q.unit == Unit::One => {
            Some(Percent::new(q.value)?)
        }
        State::OnOff(OnOff::On) | State::UpDown(UpDown::Down) => Some(Percent::HUNDRED),
        State::OnOff(OnOff::Off) | State::UpDown(UpDown::Up) => Some(Percent::ZERO),
        _ => None,
    })
}

fn on_off(state: &State) -> Option<OnOff> {
    match state {
        State::OnOff(v) => Some(*v),
        State::OpenClosed(OpenClosed::Open) => Some(OnOff::On),
        State::OpenClosed(OpenClosed::Closed) => Some(OnOff::Off),
        State::Decimal(_) | State::Percent(_) | State::Quantity(_) => {
            number(state).map(|v| if v.abs() < f64::EPSILON { OnOff::Off } else { OnOff::On })
        }
        _ => None,
    }
}

fn up_down(state: &State) -> Option<UpDown> {
    let position = match state {
        State::Percent(p) => p.value(),
        State::Decimal(v) => *v,
        _ => return None,
    };
    if position <= 0.0 {
        Some(UpDown::Up)
    } else if position >= 100.0 {
        Some(UpDown::Down)
    } else {
        None
    }
}

fn unsupported(state: &State, target: StateKind) -> ValueError {
    ValueError::Conversion {
        from: state.kind().name(),
        to: target.name(),
    }
}
