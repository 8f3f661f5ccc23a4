//! Cucumber step-definition sections per action bucket.
//!
//! Steps whose text names the route's resource live here. Resource-agnostic
//! steps ("I should see a success message", "I confirm the deletion") are
//! written once into `common_steps.rb` instead.

use super::{finish, ScaffoldContext, SectionRenderer};
use crate::error::Result;
use crate::routes::ActionBucket;
use askama::Template;

/// Section sources for one bucket
#[derive(Debug, Clone, Copy)]
pub struct StepSections {
    pub navigation: &'static [&'static str],
    pub interactions: &'static [&'static str],
    pub verifications: &'static [&'static str],
    pub data: &'static [&'static str],
}

const NAVIGATION: &str = r##"# Navigation steps for {{ plural_phrase }} {{ action_phrase }}
When("I visit the {{ plural_phrase }} {{ action_phrase }} page") do
  @page_object = {{ page_class }}.new
  @page_object.visit_page
  capture_cucumber_step("visit_{{ route_key }}_{{ action }}")
end

When("I navigate to the {{ plural_phrase }} {{ action_phrase }} page") do
  @page_object = {{ page_class }}.new
  @page_object.visit_page
  capture_cucumber_step("navigate_to_{{ route_key }}_{{ action }}")
end

Then("I should be on the {{ plural_phrase }} {{ action_phrase }} page") do
  expect(@page_object).to be_loaded
  capture_cucumber_step("verify_{{ route_key }}_{{ action }}_loaded")
end"##;

const VISIT_SHOW: &str = r##"When("I visit the {{ singular_phrase }} show page") do
  @page_object = {{ page_class }}.new
  @page_object.visit_page
  capture_cucumber_step("visit_{{ singular_key }}_show")
end"##;

const VISIT_NEW: &str = r##"When("I visit the new {{ singular_phrase }} page") do
  @page_object = {{ page_class }}.new
  @page_object.visit_page
  capture_cucumber_step("visit_new_{{ singular_key }}")
end"##;

const VISIT_EDIT: &str = r##"When("I visit the edit {{ singular_phrase }} page") do
  @page_object = {{ page_class }}.new
  @page_object.visit_page
  capture_cucumber_step("visit_edit_{{ singular_key }}")
end"##;

const VERIFICATIONS: &str = r##"# Verification steps for {{ plural_phrase }} {{ action_phrase }}
Then("I should see the {{ plural_phrase }} {{ action_phrase }} page") do
  expect(@page_object).to be_loaded
  capture_cucumber_step("verify_{{ route_key }}_{{ action }}_page_loaded")
end

Then("I should be redirected to the {{ plural_phrase }} index page") do
  expect(current_path).to eq({{ route_key }}_path)
  capture_cucumber_step("verify_redirect_to_{{ route_key }}_index")
end"##;

const MEMBER_VERIFICATIONS: &str = r##"Then("I should be redirected to the {{ singular_phrase }} show page") do
  expect(current_path).to match(%r{/{{ controller }}/\d+})
  capture_cucumber_step("verify_redirect_to_{{ singular_key }}_show")
end

Then("I should remain on the {{ singular_phrase }} show page") do
  expect(current_path).to eq({{ singular_key }}_path(@{{ singular_key }}))
  capture_cucumber_step("verify_still_on_{{ singular_key }}_show")
end

Then("the {{ singular_phrase }} should still exist") do
  expect({{ model }}.exists?(@{{ singular_key }}.id)).to be(true)
end

Then("the {{ singular_phrase }} should remain unchanged") do
  expect(@{{ singular_key }}.reload.updated_at).to eq(@{{ singular_key }}.updated_at)
end"##;

const DATA: &str = r##"# Data setup steps
Given(/^there (?:is|are) (\d+) {{ plural_phrase }} in the system$/) do |count|
  count.to_i.times do |i|
    create(:{{ singular_key }}, name: "{{ singular_phrase }} #{i + 1}")
  end
  @initial_{{ singular_key }}_count = {{ model }}.count
end

Given(/^there (?:is|are) {{ plural_phrase }} with names (.+)$/) do |names|
  names.scan(/"([^"]*)"/).flatten.each do |name|
    create(:{{ singular_key }}, name: name)
  end
  @initial_{{ singular_key }}_count = {{ model }}.count
end

Given(/^there are no {{ plural_phrase }} in the system$/) do
  {{ model }}.destroy_all
  @initial_{{ singular_key }}_count = 0
end"##;

const MEMBER_DATA: &str = r##"Given(/^there is a {{ singular_phrase }} in the system$/) do
  @{{ singular_key }} = create(:{{ singular_key }})
  @initial_{{ singular_key }}_count = {{ model }}.count
end

Given(/^there is a {{ singular_phrase }} named "([^"]*)"$/) do |name|
  @{{ singular_key }} = create(:{{ singular_key }}, name: name)
  @initial_{{ singular_key }}_count = {{ model }}.count
end

Given(/^there is a {{ singular_phrase }} with sample data$/) do
  @{{ singular_key }} = create(:{{ singular_key }}, :with_sample_data)
  @initial_{{ singular_key }}_count = {{ model }}.count
end"##;

const COUNT_DELTA: &str = r##"Then("the number of {{ plural_phrase }} should change by {int}") do |delta|
  @initial_{{ singular_key }}_count ||= 0
  expect({{ model }}.count - @initial_{{ singular_key }}_count).to eq(delta)
end

Then("no {{ singular_phrase }} should be created") do
  expect({{ model }}.count).to eq(@initial_{{ singular_key }}_count || 0)
end"##;

const INDEX: StepSections = StepSections {
    navigation: &[NAVIGATION],
    interactions: &[r##"# Index page interactions
When("I search for {string} in the {{ plural_phrase }} list") do |search_term|
  @page_object.search_for(search_term)
  capture_cucumber_step("search_{{ route_key }}")
end

When("I click on the first {{ singular_phrase }} in the list") do
  @page_object.click_item(0)
  capture_cucumber_step("click_first_{{ singular_key }}")
end

When("I click on the new {{ singular_phrase }} link") do
  @page_object.click_new_link
  capture_cucumber_step("click_new_{{ singular_key }}_link")
end"##],
    verifications: &[
        VERIFICATIONS,
        r##"Then("I should see {int} {{ plural_phrase }} listed") do |count|
  expect(@page_object.list_items.count).to eq(count)
end

Then("each {{ singular_phrase }} should display its basic information") do
  @page_object.list_items.each { |item| expect(item.text).not_to be_empty }
end

Then("I should see a link to create a new {{ singular_phrase }}") do
  expect(@page_object.new_link).to be_present
end

Then("I should see an empty state message") do
  expect(@page_object).not_to have_items
end

Then("I should see pagination controls") do
  expect(@page_object).to have_pagination
end

Then("I should see the first page of results") do
  expect(@page_object).to have_items
end"##,
    ],
    data: &[DATA],
};

const SHOW: StepSections = StepSections {
    navigation: &[NAVIGATION, VISIT_SHOW],
    interactions: &[r##"# Show page interactions
When("I click the edit {{ singular_phrase }} link") do
  @page_object.click_edit
  capture_cucumber_step("click_edit_{{ singular_key }}_link")
end

When("I click the delete {{ singular_phrase }} link") do
  @page_object.click_delete
  capture_cucumber_step("click_delete_{{ singular_key }}_link")
end"##],
    verifications: &[
        VERIFICATIONS,
        MEMBER_VERIFICATIONS,
        r##"Then("I should see the {{ singular_phrase }} details") do
  expect(@page_object).to be_loaded
  expect(@page_object.title).to be_present
end

Then("I should see {string} in the title") do |text|
  expect(@page_object.title).to have_text(text)
end

Then("I should see edit and delete options") do
  expect(@page_object).to have_edit_link
  expect(@page_object).to have_delete_link
end

Then("I should be on the edit {{ singular_phrase }} page") do
  expect(current_path).to end_with("/edit")
end"##,
    ],
    data: &[DATA, MEMBER_DATA],
};

const NEW: StepSections = StepSections {
    navigation: &[NAVIGATION, VISIT_NEW],
    interactions: &[r##"# New/Create page interactions
When("I fill in the {{ singular_phrase }} form with valid data") do
  @page_object.fill_form_with_valid_data
  capture_cucumber_step("fill_valid_{{ singular_key }}_form")
end

When("I fill in the {{ singular_phrase }} form with invalid data") do
  @page_object.fill_form_with_invalid_data
  capture_cucumber_step("fill_invalid_{{ singular_key }}_form")
end

When("I submit the {{ singular_phrase }} form") do
  @page_object.submit_form
  capture_cucumber_step("submit_{{ singular_key }}_form")
end

When("I cancel the {{ singular_phrase }} form") do
  @page_object.cancel
  capture_cucumber_step("cancel_{{ singular_key }}_form")
end"##],
    verifications: &[
        VERIFICATIONS,
        r##"Then("I should see the {{ singular_phrase }} creation form") do
  expect(@page_object.form).to be_present
end

Then("all required fields should be present") do
  expect(@page_object).to have_required_fields
end

Then("I should see submit and cancel buttons") do
  expect(@page_object.submit_button).to be_present
  expect(@page_object.cancel_link).to be_present
end

Then("I should be redirected to the {{ singular_phrase }} show page") do
  expect(current_path).to match(%r{/{{ controller }}/\d+})
  capture_cucumber_step("verify_redirect_to_{{ singular_key }}_show")
end"##,
    ],
    data: &[DATA, COUNT_DELTA],
};

const EDIT: StepSections = StepSections {
    navigation: &[NAVIGATION, VISIT_EDIT],
    interactions: &[r##"# Edit/Update page interactions
When("I update the {{ singular_phrase }} with valid data") do
  @page_object.fill_form_with_valid_data
  capture_cucumber_step("fill_valid_update_{{ singular_key }}_form")
  @page_object.submit_form
  capture_cucumber_step("submit_update_{{ singular_key }}_form")
end

When("I update the {{ singular_phrase }} with invalid data") do
  @page_object.fill_form_with_invalid_data
  capture_cucumber_step("fill_invalid_update_{{ singular_key }}_form")
  @page_object.submit_form
  capture_cucumber_step("submit_invalid_update_{{ singular_key }}_form")
end

When("I cancel the {{ singular_phrase }} update") do
  @page_object.cancel
  capture_cucumber_step("cancel_update_{{ singular_key }}")
end"##],
    verifications: &[
        VERIFICATIONS,
        MEMBER_VERIFICATIONS,
        r##"Then("I should see the {{ singular_phrase }} edit form") do
  expect(@page_object.form).to be_present
end

Then("the form should be pre-filled with {string}") do |value|
  expect(@page_object).to be_prefilled_with('name', value)
end"##,
    ],
    data: &[DATA, MEMBER_DATA],
};

const DESTROY: StepSections = StepSections {
    navigation: &[NAVIGATION, VISIT_SHOW],
    interactions: &[r##"# Destroy interactions
When("I click the delete {{ singular_phrase }} link") do
  @page_object.click_delete
  capture_cucumber_step("click_delete_{{ singular_key }}_link")
end"##],
    verifications: &[VERIFICATIONS, MEMBER_VERIFICATIONS],
    data: &[DATA, MEMBER_DATA, COUNT_DELTA],
};

const OTHER: StepSections = StepSections {
    navigation: &[NAVIGATION],
    interactions: &[],
    verifications: &[VERIFICATIONS],
    data: &[DATA],
};

/// Step-definition registry
pub fn sections(bucket: ActionBucket) -> StepSections {
    match bucket {
        ActionBucket::Index => INDEX,
        ActionBucket::Show => SHOW,
        ActionBucket::New | ActionBucket::Create => NEW,
        ActionBucket::Edit | ActionBucket::Update => EDIT,
        ActionBucket::Destroy => DESTROY,
        ActionBucket::Other => OTHER,
    }
}

#[derive(Template)]
#[template(path = "steps.rb.txt", escape = "none")]
struct StepsTemplate<'a> {
    require_path: &'a str,
    controller: &'a str,
    action: &'a str,
    navigation: String,
    interactions: String,
    verifications: String,
    data: String,
}

/// Full step-definition file; `require_path` loads the page object
pub fn render(
    renderer: &SectionRenderer,
    ctx: &ScaffoldContext,
    bucket: ActionBucket,
    require_path: &str,
) -> Result<String> {
    let s = sections(bucket);
    let template = StepsTemplate {
        require_path,
        controller: &ctx.controller,
        action: &ctx.action,
        navigation: renderer.render_section(s.navigation, ctx, "\n\n", 0)?,
        interactions: renderer.render_section(s.interactions, ctx, "\n\n", 0)?,
        verifications: renderer.render_section(s.verifications, ctx, "\n\n", 0)?,
        data: renderer.render_section(s.data, ctx, "\n\n", 0)?,
    };
    Ok(finish(template.render()?))
}
