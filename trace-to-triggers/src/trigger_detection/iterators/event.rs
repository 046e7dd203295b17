use super::{Assembler, Detector, Real, Trigger};

#[derive(Clone)]
pub struct EventIter<I, D>
where
    I: Iterator<Item = (Real, Real)>,
    D: Detector,
{
    source: I,
    detector: D,
}

impl<I, D> Iterator for EventIter<I, D>
where
    I: Iterator<Item = (Real, Real)>,
    D: Detector,
{
    type Item = D::EventType;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (time, value) = self.source.next()?;
            if let Some(event) = self.detector.signal(time, value) {
                return Some(event);
            }
        }
    }
}

pub trait EventFilter<I, D>
where
    I: Iterator<Item = (Real, Real)>,
    D: Detector,
{
    fn events(self, detector: D) -> EventIter<I, D>;
}

impl<I, D> EventFilter<I, D> for I
where
    I: Iterator<Item = (Real, Real)>,
    D: Detector,
{
    fn events(self, detector: D) -> EventIter<I, D> {
        EventIter {
            source: self,
            detector,
        }
    }
}

#[derive(Clone)]
pub struct AssemblerIter<I, A>
where
    A: Assembler,
    I: Iterator<Item = <A::DetectorType as Detector>::EventType>,
{
    source: I,
    assembler: A,
}

impl<I, A> Iterator for AssemblerIter<I, A>
where
    A: Assembler,
    I: Iterator<Item = <A::DetectorType as Detector>::EventType>,
{
    type Item = Trigger;

    fn next(&mut self) -> Option<Trigger> {
        for event in &mut self.source {
            let trigger = self.assembler.assemble(event);
            if trigger.is_some() {
                return trigger;
            }
        }
        None
    }
}

pub trait AssembleFilter<I, A>
where
    A: Assembler,
    I: Iterator<Item = <A::DetectorType as Detector>::EventType>,
{
    fn assemble(self, assembler: A) -> AssemblerIter<I, A>;
}

impl<I, A> AssembleFilter<I, A> for I
where
    A: Assembler,
    I: Iterator<Item = <A::DetectorType as Detector>::EventType>,
{
    fn assemble(self, assembler: A) -> AssemblerIter<I, A> {
        AssemblerIter {
            source: self,
            assembler,
        }
    }
}
