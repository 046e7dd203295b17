pub mod sta_lta;

use super::Real;

/// A stateful function applied across a trace, emitting at most one
/// output per sample pushed in.
pub trait Window: Clone {
    type OutputType;

    /// Pushes a sample into the window, returning whether the window has
    /// output available.
    fn push(&mut self, value: Real) -> bool;

    fn output(&self) -> Option<Self::OutputType>;

    /// Maps the time of the current sample to the time the output refers to.
    fn apply_time_shift(&self, time: Real) -> Real;
}

#[derive(Clone)]
pub struct WindowIter<I, W>
where
    I: Iterator<Item = (Real, Real)>,
    W: Window,
{
    window_function: W,
    source: I,
}

impl<I, W> WindowIter<I, W>
where
    I: Iterator<Item = (Real, Real)>,
    W: Window,
{
    pub fn new(source: I, window_function: W) -> Self {
        WindowIter {
            source,
            window_function,
        }
    }
}

impl<I, W> Iterator for WindowIter<I, W>
where
    I: Iterator<Item = (Real, Real)>,
    W: Window,
{
    type Item = (Real, W::OutputType);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (time, value) = self.source.next()?;
            if self.window_function.push(value) {
                return Some((
                    self.window_function.apply_time_shift(time),
                    self.window_function.output()?,
                ));
            }
        }
    }
}

pub trait WindowFilter<I, W>
where
    I: Iterator<Item = (Real, Real)>,
    W: Window,
{
    fn window(self, window: W) -> WindowIter<I, W>;
}

impl<I, W> WindowFilter<I, W> for I
where
    I: Iterator<Item = (Real, Real)>,
    W: Window,
{
    fn window(self, window: W) -> WindowIter<I, W> {
        WindowIter::<I, W>::new(self, window)
    }
}
