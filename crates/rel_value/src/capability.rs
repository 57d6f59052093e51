use bitflags::bitflags;

bitflags! {
    /// Operations a value kind supports.
    ///
    /// Tree constructors consult these to reject operator trees that would
    /// hit an unsupported operation at evaluation time.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// `equal` is meaningful.
        const EQUALITY = 1 << 0;
        /// `compare` yields an ordering.
        const COMPARABLE = 1 << 1;
        /// `search_all` is supported.
        const SEARCHABLE = 1 << 2;
        /// `assign` is supported. No kind of this algebra has it.
        const ASSIGNABLE = 1 << 3;
        /// `reference` is supported.
        const REFERABLE = 1 << 4;
        /// Can drive a `for` loop.
        const ITERABLE = 1 << 5;
        /// Can be bound as a loop element.
        const ITERATION_VALUE = 1 << 6;
        /// Has a natural string form.
        const SCALAR = 1 << 7;
    }
}

impl Capabilities {
    /// Lowercase names of the set flags, for diagnostics.
    pub fn names(self) -> Vec<&'static str> {
        self.iter_names()
            .map(|(name, _)| match name {
                "EQUALITY" => "equality",
                "COMPARABLE" => "comparable",
                "SEARCHABLE" => "searchable",
                "ASSIGNABLE" => "assignable",
                "REFERABLE" => "referable",
                "ITERABLE" => "iterable",
                "ITERATION_VALUE" => "iteration-value",
                _ => "scalar",
            })
            .collect()
    }
}
