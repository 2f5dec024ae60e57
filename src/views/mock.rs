//! Mock navigation seams for isolating controllers in tests.

use mockall::mock;

use crate::routes::Route;
use crate::views::{Confirm, Navigator};

mock! {
    pub Router {}

    impl Navigator for Router {
        fn navigate(&self, route: Route);
    }
}

mock! {
    pub Prompt {}

    impl Confirm for Prompt {
        fn confirm(&self, prompt: &str) -> bool;
    }
}
