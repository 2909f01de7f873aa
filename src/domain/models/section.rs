use strum::EnumIter;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, strum::Display)]
pub enum Section {
    #[strum(serialize = "Sales Reps")]
    SalesReps,
    #[strum(serialize = "AI Chat")]
    Chat,
}

impl Section {
    pub fn next(&self) -> Section {
        let sections = Section::iter().collect::<Vec<Section>>();
        let idx = sections
            .iter()
            .position(|section| return section == self)
            .unwrap_or_default();

        return sections[(idx + 1) % sections.len()];
    }
}
