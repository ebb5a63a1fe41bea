//! The named views of the portal and the navigation bar that links them.

use maud::{Markup, html};

use crate::endpoints;

/// A page the customer can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Usage overview, served at `/` and `/dashboard`.
    Dashboard,
    /// Buy a data package.
    DataPackages,
    /// Filterable list of past transactions.
    TransactionHistory,
    /// Profile, preferences and password.
    Settings,
    /// Log in to an existing account.
    LogIn,
    /// Create an account.
    Register,
}

impl View {
    /// Every view, in navigation order.
    pub const ALL: [View; 6] = [
        View::Dashboard,
        View::DataPackages,
        View::TransactionHistory,
        View::Settings,
        View::LogIn,
        View::Register,
    ];

    /// The route the view is served at.
    pub fn path(self) -> &'static str {
        match self {
            View::Dashboard => endpoints::DASHBOARD_VIEW,
            View::DataPackages => endpoints::DATA_PACKAGES_VIEW,
            View::TransactionHistory => endpoints::TRANSACTION_HISTORY_VIEW,
            View::Settings => endpoints::SETTINGS_VIEW,
            View::LogIn => endpoints::LOG_IN_VIEW,
            View::Register => endpoints::REGISTER_VIEW,
        }
    }

    /// The page title and navigation label.
    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::DataPackages => "Data Packages",
            View::TransactionHistory => "Transaction History",
            View::Settings => "Settings",
            View::LogIn => "Log In",
            View::Register => "Register",
        }
    }

    /// The view served at `path`, if any. The root path is the dashboard.
    pub fn from_path(path: &str) -> Option<View> {
        if path == endpoints::ROOT {
            return Some(View::Dashboard);
        }

        View::ALL.into_iter().find(|view| view.path() == path)
    }

    fn in_nav_bar(self) -> bool {
        matches!(
            self,
            View::Dashboard | View::DataPackages | View::TransactionHistory | View::Settings
        )
    }
}

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link {
    url: &'static str,
    title: &'static str,
    is_current: bool,
}

impl Link {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm lg:bg-transparent
        lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 lg:p-0
        dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
        dark:hover:text-white lg:dark:hover:bg-transparent"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

pub struct NavBar {
    links: Vec<Link>,
}

impl NavBar {
    /// Get the navigation bar.
    ///
    /// The link for `active_view` is marked as current and displayed differently.
    pub fn new(active_view: View) -> NavBar {
        let mut links: Vec<Link> = View::ALL
            .into_iter()
            .filter(|view| view.in_nav_bar())
            .map(|view| Link {
                url: view.path(),
                title: view.title(),
                is_current: view == active_view,
            })
            .collect();

        links.push(Link {
            url: endpoints::LOG_OUT,
            title: "Log out",
            is_current: false,
        });

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::ROOT)
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                    {
                        span
                            class="self-center text-2xl font-semibold whitespace-nowrap
                            text-blue-600 dark:text-white"
                        {
                            "DataNet"
                        }
                    }

                    div class="w-full lg:block lg:w-auto"
                    {
                        ul
                            class="font-medium flex flex-col p-4 lg:p-0 mt-4
                            border border-gray-100 rounded bg-gray-50
                            lg:flex-row lg:space-x-8 rtl:space-x-reverse lg:mt-0
                            lg:border-0 lg:bg-white dark:bg-gray-800
                            lg:dark:bg-gray-900 dark:border-gray-700"
                        {
                            @for link in self.links {
                                li { (link.into_html()) }
                            }
                        }
                    }
                }
            }
        )
    }
}
