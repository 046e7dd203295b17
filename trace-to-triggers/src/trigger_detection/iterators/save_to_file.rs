use super::super::trigger::TriggerInterval;
use std::{
    fs::File,
    io::{Error, Write},
    path::Path,
};

pub trait SavablePoint {
    fn write_to_file(&self, file: &mut File) -> Result<(), Error>;
}

impl SavablePoint for TriggerInterval {
    fn write_to_file(&self, file: &mut File) -> Result<(), Error> {
        writeln!(file, "{0}", self)
    }
}

pub trait SaveToFileFilter<I>
where
    I: Iterator,
    I::Item: SavablePoint,
{
    fn save_to_file(self, path: &Path) -> Result<(), Error>;
}

impl<I> SaveToFileFilter<I> for I
where
    I: Iterator,
    I::Item: SavablePoint,
{
    fn save_to_file(self, path: &Path) -> Result<(), Error> {
        let mut file = File::create(path)?;
        for item in self {
            item.write_to_file(&mut file)?;
        }
        Ok(())
    }
}
