//! Route table, activated-route snapshots and the navigation history.

use std::{collections::BTreeMap, fmt};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route matches \"{0}\"")]
    NotFound(String),
}

/// Resource collections with list and form pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Categories,
    Entries,
}

impl Collection {
    pub fn path(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Entries => "entries",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Categories => "Categorias",
            Self::Entries => "Lançamentos",
        }
    }

    fn from_path(path: &str) -> Option<Self> {
        match path {
            "categories" => Some(Self::Categories),
            "entries" => Some(Self::Entries),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Reports,
    List(Collection),
    Form(Collection),
}

/// Whether a form session creates or edits a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    New,
    Edit,
}

impl Mode {
    /// `new` as first child segment selects [`Mode::New`], anything else
    /// [`Mode::Edit`].
    pub fn from_route(route: &ActivatedRoute) -> Self {
        match route.first_segment() {
            Some("new") => Self::New,
            _ => Self::Edit,
        }
    }
}

/// Snapshot of the route a page was activated for.
///
/// `parent` is the collection path (`entries`), `segments` the child URL
/// below it (`["12", "edit"]`) and `params` the named parameters the child
/// pattern captured (`id`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivatedRoute {
    page: Page,
    parent: String,
    segments: Vec<String>,
    params: BTreeMap<String, String>,
}

impl ActivatedRoute {
    pub fn new<I, S>(page: Page, parent: &str, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            page,
            parent: parent.to_string(),
            segments: segments.into_iter().map(Into::into).collect(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    /// Matches `url` against the application routes.
    pub fn parse(url: &str) -> Result<Self, RouteError> {
        let segments: Vec<&str> = url
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] | ["reports"] => Ok(Self::new(Page::Reports, "reports", Vec::<String>::new())),
            [parent, rest @ ..] => {
                let collection = Collection::from_path(parent)
                    .ok_or_else(|| RouteError::NotFound(url.to_string()))?;
                match rest {
                    [] => Ok(Self::new(Page::List(collection), parent, rest.iter().copied())),
                    ["new"] => Ok(Self::new(Page::Form(collection), parent, rest.iter().copied())),
                    [id, "edit"] => {
                        Ok(Self::new(Page::Form(collection), parent, rest.iter().copied())
                            .with_param("id", id))
                    }
                    _ => Err(RouteError::NotFound(url.to_string())),
                }
            }
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn parent_path(&self) -> &str {
        &self.parent
    }

    pub fn first_segment(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn url(&self) -> String {
        if self.segments.is_empty() {
            return self.parent.clone();
        }
        format!("{}/{}", self.parent, self.segments.join("/"))
    }
}

impl fmt::Display for ActivatedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.url())
    }
}

/// Current route plus the location history.
///
/// Every navigation re-activates its target, even when the URL does not
/// change; the form controller relies on this to reload itself after a
/// save.
#[derive(Debug)]
pub struct Router {
    current: ActivatedRoute,
    location: String,
    history: Vec<String>,
}

impl Router {
    pub fn new(initial_url: &str) -> Result<Self, RouteError> {
        let current = ActivatedRoute::parse(initial_url)?;
        Ok(Self {
            location: current.url(),
            current,
            history: Vec::new(),
        })
    }

    pub fn current(&self) -> &ActivatedRoute {
        &self.current
    }

    /// URL as the user would see it in the address bar.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Activates `url`. With `skip_location_change` the location and history
    /// are left untouched.
    pub fn navigate_by_url(
        &mut self,
        url: &str,
        skip_location_change: bool,
    ) -> Result<&ActivatedRoute, RouteError> {
        let route = ActivatedRoute::parse(url)?;
        tracing::debug!(%route, skip_location_change, "navigating");

        if !skip_location_change {
            let url = route.url();
            if url != self.location {
                let previous = std::mem::replace(&mut self.location, url);
                self.history.push(previous);
            }
        }
        self.current = route;
        Ok(&self.current)
    }

    /// Goes back to the previous location, if any.
    pub fn back(&mut self) -> Option<&ActivatedRoute> {
        let previous = self.history.pop()?;
        let route = ActivatedRoute::parse(&previous).ok()?;
        self.location = previous;
        self.current = route;
        Some(&self.current)
    }
}
