/// Static region → locality → category percentage table.
///
/// Percentages are relative weights out of 100. They are not required to sum
/// to exactly 100 per locality, though the built-in data happens to.
pub struct LocationTable {
    regions: &'static [Region],
}

pub struct Region {
    pub name: &'static str,
    pub localities: &'static [Locality],
}

pub struct Locality {
    pub name: &'static str,
    pub percentages: &'static [(&'static str, u32)],
}

impl LocationTable {
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    pub fn regions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.regions.iter().map(|r| r.name)
    }

    pub fn localities(&self, region: &str) -> Option<impl Iterator<Item = &'static str> + '_> {
        self.region(region)
            .map(|r| r.localities.iter().map(|l| l.name))
    }

    /// Category percentages for a (region, locality) pair, case-insensitive.
    pub fn percentages(
        &self,
        region: &str,
        locality: &str,
    ) -> Option<&'static [(&'static str, u32)]> {
        let region = self.region(region)?;
        region
            .localities
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(locality))
            .map(|l| l.percentages)
    }

    /// Canonical (region, locality) spelling for possibly-differently-cased
    /// input, so stored state always carries the table's own names.
    pub fn canonical(&self, region: &str, locality: &str) -> Option<(&'static str, &'static str)> {
        let region = self.region(region)?;
        region
            .localities
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(locality))
            .map(|l| (region.name, l.name))
    }

    fn region(&self, name: &str) -> Option<&'static Region> {
        self.regions
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }
}

static BUILTIN: LocationTable = LocationTable {
    regions: &[
        Region {
            name: "New York",
            localities: &[
                Locality {
                    name: "New York",
                    percentages: &[
                        ("Venue", 28),
                        ("Catering", 23),
                        ("Photography", 10),
                        ("Attire", 8),
                        ("Flowers", 7),
                        ("Music", 5),
                        ("Invitations", 3),
                        ("Favors", 2),
                        ("Wedding Planner", 5),
                        ("Miscellaneous", 9),
                    ],
                },
                Locality {
                    name: "Buffalo",
                    percentages: &[
                        ("Venue", 24),
                        ("Catering", 26),
                        ("Photography", 12),
                        ("Attire", 9),
                        ("Flowers", 6),
                        ("Music", 5),
                        ("Invitations", 3),
                        ("Favors", 2),
                        ("Wedding Planner", 4),
                        ("Miscellaneous", 9),
                    ],
                },
            ],
        },
        Region {
            name: "California",
            localities: &[
                Locality {
                    name: "Los Angeles",
                    percentages: &[
                        ("Venue", 26),
                        ("Catering", 24),
                        ("Photography", 12),
                        ("Attire", 7),
                        ("Flowers", 8),
                        ("Music", 6),
                        ("Invitations", 3),
                        ("Favors", 2),
                        ("Wedding Planner", 6),
                        ("Miscellaneous", 6),
                    ],
                },
                Locality {
                    name: "San Francisco",
                    percentages: &[
                        ("Venue", 30),
                        ("Catering", 22),
                        ("Photography", 11),
                        ("Attire", 8),
                        ("Flowers", 7),
                        ("Music", 5),
                        ("Invitations", 3),
                        ("Favors", 2),
                        ("Wedding Planner", 7),
                        ("Miscellaneous", 5),
                    ],
                },
            ],
        },
        Region {
            name: "Texas",
            localities: &[
                Locality {
                    name: "Houston",
                    percentages: &[
                        ("Venue", 25),
                        ("Catering", 26),
                        ("Photography", 11),
                        ("Attire", 9),
                        ("Flowers", 7),
                        ("Music", 5),
                        ("Invitations", 3),
                        ("Favors", 2),
                        ("Wedding Planner", 4),
                        ("Miscellaneous", 8),
                    ],
                },
                Locality {
                    name: "Austin",
                    percentages: &[
                        ("Venue", 26),
                        ("Catering", 25),
                        ("Photography", 12),
                        ("Attire", 8),
                        ("Flowers", 7),
                        ("Music", 6),
                        ("Invitations", 3),
                        ("Favors", 2),
                        ("Wedding Planner", 5),
                        ("Miscellaneous", 6),
                    ],
                },
            ],
        },
    ],
};
