use crate::input::RepoTarget;
use crate::model::activity::WeeklyActivity;
use crate::source::error::SourceError;

pub trait ActivitySource {
    /// Weekly commit activity for `target`, oldest week first.
    fn fetch(&self, target: &RepoTarget) -> Result<Vec<WeeklyActivity>, SourceError>;
}

impl<S: ActivitySource + ?Sized> ActivitySource for Box<S> {
    fn fetch(&self, target: &RepoTarget) -> Result<Vec<WeeklyActivity>, SourceError> {
        (**self).fetch(target)
    }
}
