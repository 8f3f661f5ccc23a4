//! Gherkin feature sections per action bucket.

use super::{finish, ScaffoldContext, SectionRenderer};
use crate::error::Result;
use crate::routes::ActionBucket;
use askama::Template;

/// Section sources for one bucket
#[derive(Debug, Clone, Copy)]
pub struct FeatureSections {
    /// Completes "I want to ..."
    pub user_story: &'static str,
    /// Completes "So that ..."
    pub benefit: &'static str,
    /// Extra background steps after "Given I am on the application"
    pub background: &'static [&'static str],
    pub scenarios: &'static [&'static str],
}

const AUTH_STEP: &str = "{% if requires_auth %}And I am authenticated as a user{% endif %}";
const MEMBER_STEP: &str = "And there is a {{ singular_phrase }} in the system";

const INDEX: FeatureSections = FeatureSections {
    user_story: "view all {{ plural_phrase }}",
    benefit: "I can see all available {{ plural_phrase }} and navigate to specific ones",
    background: &[AUTH_STEP],
    scenarios: &[
        r##"Scenario: Viewing empty {{ plural_phrase }} list
  Given there are no {{ plural_phrase }} in the system
  When I visit the {{ plural_phrase }} index page
  Then I should see an empty state message
  And I should see a link to create a new {{ singular_phrase }}"##,
        r##"Scenario: Viewing {{ plural_phrase }} list with items
  Given there are 3 {{ plural_phrase }} in the system
  When I visit the {{ plural_phrase }} index page
  Then I should see 3 {{ plural_phrase }} listed
  And each {{ singular_phrase }} should display its basic information"##,
        r##"@search
Scenario: Searching {{ plural_phrase }}
  Given there are {{ plural_phrase }} with names "Alpha", "Beta", "Gamma"
  When I visit the {{ plural_phrase }} index page
  And I search for "Alpha" in the {{ plural_phrase }} list
  Then I should see "Alpha"
  And I should not see "Beta"
  And I should not see "Gamma""##,
        r##"@pagination
Scenario: Paginating through {{ plural_phrase }}
  Given there are 25 {{ plural_phrase }} in the system
  When I visit the {{ plural_phrase }} index page
  Then I should see pagination controls
  And I should see the first page of results"##,
    ],
};

const SHOW: FeatureSections = FeatureSections {
    user_story: "view a specific {{ singular_phrase }}",
    benefit: "I can view detailed information about the {{ singular_phrase }}",
    background: &[AUTH_STEP, MEMBER_STEP],
    scenarios: &[
        r##"Scenario: Viewing {{ singular_phrase }} details
  Given there is a {{ singular_phrase }} named "Test Item"
  When I visit the {{ singular_phrase }} show page
  Then I should see the {{ singular_phrase }} details
  And I should see "Test Item" in the title
  And I should see edit and delete options"##,
        r##"Scenario: Navigating from {{ singular_phrase }} details
  Given there is a {{ singular_phrase }} in the system
  When I visit the {{ singular_phrase }} show page
  And I click the edit {{ singular_phrase }} link
  Then I should be on the edit {{ singular_phrase }} page"##,
        r##"@screenshot
Scenario: Taking screenshot of {{ singular_phrase }} page
  Given there is a {{ singular_phrase }} with sample data
  When I visit the {{ singular_phrase }} show page
  Then I take a screenshot"##,
    ],
};

const NEW: FeatureSections = FeatureSections {
    user_story: "access the form to create a new {{ singular_phrase }}",
    benefit: "I can add new {{ plural_phrase }} to the system",
    background: &[AUTH_STEP],
    scenarios: &[
        r##"Scenario: Accessing new {{ singular_phrase }} form
  When I visit the new {{ singular_phrase }} page
  Then I should see the {{ singular_phrase }} creation form
  And all required fields should be present
  And I should see submit and cancel buttons"##,
        r##"Scenario: Canceling {{ singular_phrase }} creation
  When I visit the new {{ singular_phrase }} page
  And I cancel the {{ singular_phrase }} form
  Then I should be redirected to the {{ plural_phrase }} index page
  And no {{ singular_phrase }} should be created"##,
    ],
};

const CREATE: FeatureSections = FeatureSections {
    user_story: "create a new {{ singular_phrase }}",
    benefit: "I can add new {{ plural_phrase }} to the system",
    background: &[AUTH_STEP],
    scenarios: &[
        r##"Scenario: Successfully creating a {{ singular_phrase }}
  When I visit the new {{ singular_phrase }} page
  And I fill in the {{ singular_phrase }} form with valid data
  And I submit the {{ singular_phrase }} form
  Then I should see a success message
  And I should be redirected to the {{ singular_phrase }} show page
  And the number of {{ plural_phrase }} should change by 1"##,
        r##"Scenario: Creating a {{ singular_phrase }} with invalid data
  When I visit the new {{ singular_phrase }} page
  And I fill in the {{ singular_phrase }} form with invalid data
  And I submit the {{ singular_phrase }} form
  Then I should see validation errors
  And no {{ singular_phrase }} should be created"##,
        r##"Scenario: Creating a {{ singular_phrase }} with missing required fields
  When I visit the new {{ singular_phrase }} page
  And I submit the {{ singular_phrase }} form
  Then I should see "can't be blank"
  And no {{ singular_phrase }} should be created"##,
    ],
};

const EDIT: FeatureSections = FeatureSections {
    user_story: "access the form to edit a {{ singular_phrase }}",
    benefit: "I can modify existing {{ plural_phrase }} information",
    background: &[AUTH_STEP, MEMBER_STEP],
    scenarios: &[
        r##"Scenario: Accessing edit {{ singular_phrase }} form
  Given there is a {{ singular_phrase }} named "Original Name"
  When I visit the edit {{ singular_phrase }} page
  Then I should see the {{ singular_phrase }} edit form
  And the form should be pre-filled with "Original Name""##,
        r##"Scenario: Canceling {{ singular_phrase }} edit
  Given there is a {{ singular_phrase }} in the system
  When I visit the edit {{ singular_phrase }} page
  And I cancel the {{ singular_phrase }} update
  Then I should be redirected to the {{ singular_phrase }} show page
  And the {{ singular_phrase }} should remain unchanged"##,
    ],
};

const UPDATE: FeatureSections = FeatureSections {
    user_story: "update an existing {{ singular_phrase }}",
    benefit: "I can modify existing {{ plural_phrase }} information",
    background: &[AUTH_STEP, MEMBER_STEP],
    scenarios: &[
        r##"Scenario: Successfully updating a {{ singular_phrase }}
  Given there is a {{ singular_phrase }} named "Original Name"
  When I visit the edit {{ singular_phrase }} page
  And I update the {{ singular_phrase }} with valid data
  Then I should see a success message
  And I should be redirected to the {{ singular_phrase }} show page"##,
        r##"Scenario: Updating a {{ singular_phrase }} with invalid data
  Given there is a {{ singular_phrase }} in the system
  When I visit the edit {{ singular_phrase }} page
  And I update the {{ singular_phrase }} with invalid data
  Then I should see validation errors
  And the {{ singular_phrase }} should remain unchanged"##,
    ],
};

const DESTROY: FeatureSections = FeatureSections {
    user_story: "delete a {{ singular_phrase }}",
    benefit: "I can remove {{ plural_phrase }} that are no longer needed",
    background: &[AUTH_STEP, MEMBER_STEP],
    scenarios: &[
        r##"Scenario: Successfully deleting a {{ singular_phrase }}
  Given there is a {{ singular_phrase }} named "To Be Deleted"
  When I visit the {{ singular_phrase }} show page
  And I click the delete {{ singular_phrase }} link
  And I confirm the deletion
  Then the number of {{ plural_phrase }} should change by -1
  And I should see a success message
  And I should be redirected to the {{ plural_phrase }} index page
  And I should not see "To Be Deleted""##,
        r##"Scenario: Canceling {{ singular_phrase }} deletion
  Given there is a {{ singular_phrase }} in the system
  When I visit the {{ singular_phrase }} show page
  And I click the delete {{ singular_phrase }} link
  And I cancel the deletion
  Then the number of {{ plural_phrase }} should change by 0
  And I should remain on the {{ singular_phrase }} show page
  And the {{ singular_phrase }} should still exist"##,
    ],
};

const OTHER: FeatureSections = FeatureSections {
    user_story: "interact with {{ plural_phrase }} {{ action_phrase }}",
    benefit: "I can accomplish my goals related to {{ plural_phrase }}",
    background: &[AUTH_STEP],
    scenarios: &[
        r##"Scenario: Accessing {{ action_phrase }} page
  When I visit the {{ plural_phrase }} {{ action_phrase }} page
  Then I should see the {{ plural_phrase }} {{ action_phrase }} page
  And the page should load without errors"##,
        r##"Scenario: Page navigation and layout
  When I visit the {{ plural_phrase }} {{ action_phrase }} page
  Then I should see the main navigation
  And I should see the correct page title"##,
    ],
};

/// Feature registry
pub fn sections(bucket: ActionBucket) -> FeatureSections {
    match bucket {
        ActionBucket::Index => INDEX,
        ActionBucket::Show => SHOW,
        ActionBucket::New => NEW,
        ActionBucket::Create => CREATE,
        ActionBucket::Edit => EDIT,
        ActionBucket::Update => UPDATE,
        ActionBucket::Destroy => DESTROY,
        ActionBucket::Other => OTHER,
    }
}

#[derive(Template)]
#[template(path = "feature.feature.txt", escape = "none")]
struct FeatureTemplate<'a> {
    route_key: &'a str,
    action: &'a str,
    controller_title: &'a str,
    action_title: &'a str,
    user_story: String,
    benefit: String,
    background: String,
    scenarios: String,
}

/// Full `.feature` file for the context's route
pub fn render(renderer: &SectionRenderer, ctx: &ScaffoldContext, bucket: ActionBucket) -> Result<String> {
    let s = sections(bucket);
    let template = FeatureTemplate {
        route_key: &ctx.route_key,
        action: &ctx.action,
        controller_title: &ctx.controller_title,
        action_title: &ctx.action_title,
        user_story: renderer.render(s.user_story, ctx)?,
        benefit: renderer.render(s.benefit, ctx)?,
        background: renderer.render_section(s.background, ctx, "\n", 4)?,
        scenarios: renderer.render_section(s.scenarios, ctx, "\n\n", 2)?,
    };
    Ok(finish(template.render()?))
}
