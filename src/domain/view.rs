//! The directory view: derives the filtered, sorted list of masters from the
//! current criteria and sort key, and recomputes it after every user action.

use tracing::debug;

use crate::domain::{
    Master, MasterId, Rating,
    criteria::{Criteria, PriceRange},
    sort::{SortKey, sort},
};

/// Keeps the masters that satisfy `criteria`, preserving their input order.
pub fn filter<'a, I>(masters: I, criteria: &Criteria) -> Vec<&'a Master>
where
    I: IntoIterator<Item = &'a Master>,
{
    masters
        .into_iter()
        .filter(|master| criteria.matches(master))
        .collect()
}

/// Derives the view list: `sort(filter(masters, criteria), key)`.
///
/// The result depends only on the inputs, so calling this twice with the same
/// arguments yields the same masters in the same order.
pub fn derive<'a>(
    masters: &'a [Master],
    criteria: &Criteria,
    key: Option<SortKey>,
) -> Vec<&'a Master> {
    let mut view = filter(masters, criteria);
    sort(&mut view, key);
    debug!(
        total = masters.len(),
        shown = view.len(),
        sort = key.map_or("none", SortKey::as_str),
        "derived view list"
    );
    view
}

/// A single user action on the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The search text changed.
    SetQuery(String),
    /// A service badge was clicked.
    ToggleService(String),
    /// A district badge was clicked.
    ToggleDistrict(String),
    /// A price interval was chosen.
    SetPriceRange(PriceRange),
    /// A minimum rating was chosen.
    SetMinRating(Rating),
    /// Every filter was reset.
    ClearAll,
    /// The sort selector changed. `None` keeps the filtered order.
    SetSort(Option<SortKey>),
}

/// The state behind the listing page.
///
/// Owns the current criteria and sort key, and the view list derived from
/// them. Each [`Action`] replaces the criteria (or sort key) wholesale and the
/// view list is recomputed before `apply` returns.
#[derive(Debug, Clone)]
pub struct DirectoryView<'a> {
    masters: &'a [Master],
    span: PriceRange,
    criteria: Criteria,
    sort_key: Option<SortKey>,
    view: Vec<&'a Master>,
}

impl<'a> DirectoryView<'a> {
    /// Creates a view over `masters` with no filters applied.
    ///
    /// `span` is the full price span restored by [`Action::ClearAll`].
    #[must_use]
    pub fn new(masters: &'a [Master], span: PriceRange, sort_key: Option<SortKey>) -> Self {
        Self::with_criteria(masters, span, Criteria::unconstrained(span), sort_key)
    }

    /// Creates a view over `masters` starting from the given criteria.
    #[must_use]
    pub fn with_criteria(
        masters: &'a [Master],
        span: PriceRange,
        criteria: Criteria,
        sort_key: Option<SortKey>,
    ) -> Self {
        let view = derive(masters, &criteria, sort_key);
        Self {
            masters,
            span,
            criteria,
            sort_key,
            view,
        }
    }

    /// Applies a user action and returns the recomputed view list.
    pub fn apply(&mut self, action: Action) -> &[&'a Master] {
        debug!(?action, "applying directory action");

        match action {
            Action::SetQuery(query) => self.criteria = self.criteria.with_query(query),
            Action::ToggleService(service) => {
                self.criteria = self.criteria.toggle_service(&service);
            }
            Action::ToggleDistrict(district) => {
                self.criteria = self.criteria.toggle_district(&district);
            }
            Action::SetPriceRange(range) => self.criteria = self.criteria.with_price_range(range),
            Action::SetMinRating(rating) => self.criteria = self.criteria.with_min_rating(rating),
            Action::ClearAll => self.criteria = Criteria::unconstrained(self.span),
            Action::SetSort(key) => self.sort_key = key,
        }

        self.view = derive(self.masters, &self.criteria, self.sort_key);
        &self.view
    }

    /// The current view list.
    #[must_use]
    pub fn view(&self) -> &[&'a Master] {
        &self.view
    }

    /// The number of masters in the view list.
    #[must_use]
    pub fn results_count(&self) -> usize {
        self.view.len()
    }

    /// Whether the view list is empty.
    ///
    /// This is not an error: the listing shows an explicit "nothing found"
    /// state instead.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// The current criteria.
    #[must_use]
    pub const fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// The current sort key.
    #[must_use]
    pub const fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    /// The full price span.
    #[must_use]
    pub const fn span(&self) -> PriceRange {
        self.span
    }

    /// Selects a master from the view list.
    ///
    /// Returns the full record so the caller can decide what happens next.
    /// Masters filtered out of the view cannot be selected.
    #[must_use]
    pub fn select(&self, id: MasterId) -> Option<&'a Master> {
        self.view.iter().copied().find(|master| master.id == id)
    }
}

#[cfg(test)]
mod tests {
    use non_empty_string::NonEmptyString;
    use nonempty::NonEmpty;

    use super::*;

    struct Fixture {
        id: u32,
        name: &'static str,
        rating: u8,
        reviews: u32,
        services: &'static [&'static str],
        district: &'static str,
        price: u32,
        experience: u32,
    }

    const FIXTURES: [Fixture; 6] = [
        Fixture {
            id: 1,
            name: "Александр Петров",
            rating: 5,
            reviews: 47,
            services: &["Сборка мебели", "Электрика", "Монтаж полок"],
            district: "Центральный",
            price: 800,
            experience: 5,
        },
        Fixture {
            id: 2,
            name: "Дмитрий Соколов",
            rating: 4,
            reviews: 23,
            services: &["Сантехника", "Ремонт техники", "Мелкий ремонт"],
            district: "Северный",
            price: 600,
            experience: 3,
        },
        Fixture {
            id: 3,
            name: "Михаил Иванов",
            rating: 5,
            reviews: 89,
            services: &["Покраска", "Установка светильников", "Электрика"],
            district: "Южный",
            price: 1200,
            experience: 7,
        },
        Fixture {
            id: 4,
            name: "Сергей Морозов",
            rating: 4,
            reviews: 15,
            services: &["Сборка мебели", "Монтаж полок"],
            district: "Восточный",
            price: 500,
            experience: 2,
        },
        Fixture {
            id: 5,
            name: "Андрей Волков",
            rating: 5,
            reviews: 67,
            services: &[
                "Электрика",
                "Сантехника",
                "Ремонт техники",
                "Установка светильников",
            ],
            district: "Западный",
            price: 950,
            experience: 6,
        },
        Fixture {
            id: 6,
            name: "Олег Кузнецов",
            rating: 3,
            reviews: 12,
            services: &["Мелкий ремонт", "Покраска"],
            district: "Советский",
            price: 400,
            experience: 1,
        },
    ];

    fn masters() -> Vec<Master> {
        FIXTURES
            .iter()
            .map(|fixture| Master {
                id: MasterId::new(fixture.id).unwrap(),
                name: NonEmptyString::new(fixture.name.to_string()).unwrap(),
                avatar: None,
                rating: Rating::new(fixture.rating).unwrap(),
                review_count: fixture.reviews,
                specializations: NonEmpty::from_vec(
                    fixture.services.iter().map(ToString::to_string).collect(),
                )
                .unwrap(),
                district: fixture.district.to_string(),
                price_per_hour: fixture.price,
                experience: fixture.experience,
                is_online: fixture.id % 2 == 1,
            })
            .collect()
    }

    fn ids(view: &[&Master]) -> Vec<u32> {
        view.iter().map(|master| master.id.get()).collect()
    }

    #[test]
    fn single_record_filter_agrees_with_predicate() {
        let masters = masters();
        let criteria = [
            Criteria::default(),
            Criteria::default().with_query("электрика"),
            Criteria::default().toggle_service("Покраска"),
            Criteria::default().toggle_district("Южный"),
            Criteria::default().with_price_range(PriceRange::new(500, 1000).unwrap()),
            Criteria::default().with_min_rating(Rating::new(5).unwrap()),
        ];

        for criteria in &criteria {
            for master in &masters {
                let included = !filter([master], criteria).is_empty();
                assert_eq!(included, criteria.matches(master), "{criteria:?} / {}", master.id);
            }
        }
    }

    #[test]
    fn filter_preserves_input_order() {
        let masters = masters();
        let criteria = Criteria::default().with_min_rating(Rating::new(4).unwrap());

        let forward = filter(&masters, &criteria);
        assert_eq!(ids(&forward), vec![1, 2, 3, 4, 5]);

        let backward = filter(masters.iter().rev(), &criteria);
        assert_eq!(ids(&backward), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn price_range_selects_exactly_the_masters_inside_it() {
        let masters = masters();
        let criteria = Criteria::default().with_price_range(PriceRange::new(500, 1000).unwrap());

        let mut prices: Vec<u32> = filter(&masters, &criteria)
            .iter()
            .map(|master| master.price_per_hour)
            .collect();
        prices.sort_unstable();

        assert_eq!(prices, vec![500, 600, 800, 950]);
    }

    #[test]
    fn query_matches_specializations_case_insensitively() {
        let masters = masters();
        let criteria = Criteria::default().with_query("электрика");

        assert_eq!(ids(&filter(&masters, &criteria)), vec![1, 3, 5]);
    }

    #[test]
    fn cleared_criteria_sorted_by_rating_orders_the_full_set() {
        let masters = masters();

        let view = derive(&masters, &Criteria::default(), Some(SortKey::Rating));

        assert_eq!(ids(&view), vec![3, 5, 1, 2, 4, 6]);
    }

    #[test]
    fn derive_is_idempotent() {
        let masters = masters();
        let criteria = Criteria::default()
            .toggle_service("Электрика")
            .toggle_service("Сантехника");

        for key in SortKey::ALL.into_iter().map(Some).chain([None]) {
            let first = derive(&masters, &criteria, key);
            let second = derive(&masters, &criteria, key);
            assert_eq!(ids(&first), ids(&second));
        }
    }

    #[test]
    fn unknown_sort_key_keeps_filtered_order() {
        let masters = masters();

        let view = derive(&masters, &Criteria::default(), SortKey::parse_lenient("nearby"));

        assert_eq!(ids(&view), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let masters = masters();
        let mut directory = DirectoryView::new(&masters, PriceRange::FULL, Some(SortKey::Rating));

        let view = directory.apply(Action::SetQuery("кровля".to_string()));

        assert!(view.is_empty());
        assert!(directory.is_empty());
        assert_eq!(directory.results_count(), 0);
    }

    #[test]
    fn every_action_recomputes_the_view() {
        let masters = masters();
        let mut directory = DirectoryView::new(&masters, PriceRange::FULL, Some(SortKey::Rating));
        assert_eq!(directory.results_count(), 6);

        directory.apply(Action::ToggleService("Электрика".to_string()));
        assert_eq!(ids(directory.view()), vec![3, 5, 1]);

        directory.apply(Action::SetSort(Some(SortKey::PriceAsc)));
        assert_eq!(ids(directory.view()), vec![1, 5, 3]);

        directory.apply(Action::SetPriceRange(PriceRange::new(500, 1000).unwrap()));
        assert_eq!(ids(directory.view()), vec![1, 5]);

        directory.apply(Action::ToggleDistrict("Западный".to_string()));
        assert_eq!(ids(directory.view()), vec![5]);

        directory.apply(Action::SetMinRating(Rating::MAX));
        assert_eq!(ids(directory.view()), vec![5]);

        directory.apply(Action::SetQuery("волков".to_string()));
        assert_eq!(ids(directory.view()), vec![5]);

        directory.apply(Action::ClearAll);
        assert_eq!(directory.criteria(), &Criteria::unconstrained(PriceRange::FULL));
        assert_eq!(ids(directory.view()), vec![6, 4, 2, 1, 5, 3]);
        assert_eq!(directory.sort_key(), Some(SortKey::PriceAsc));
    }

    #[test]
    fn clear_all_restores_the_configured_span() {
        let masters = masters();
        let span = PriceRange::new(0, 1000).unwrap();
        let mut directory = DirectoryView::new(&masters, span, None);
        assert_eq!(ids(directory.view()), vec![1, 2, 4, 5, 6]);

        directory.apply(Action::SetPriceRange(PriceRange::new(2000, 10_000).unwrap()));
        assert!(directory.is_empty());

        directory.apply(Action::ClearAll);
        assert_eq!(directory.criteria().price_range(), span);
        assert_eq!(directory.results_count(), 5);
    }

    #[test]
    fn select_reports_masters_in_the_view_only() {
        let masters = masters();
        let mut directory = DirectoryView::new(&masters, PriceRange::FULL, None);
        let petrov = MasterId::new(1).unwrap();

        assert_eq!(directory.select(petrov).map(Master::name), Some("Александр Петров"));

        directory.apply(Action::ToggleDistrict("Южный".to_string()));
        assert!(directory.select(petrov).is_none());
    }
}
