//! RSpec feature-spec sections per action bucket.

use super::{finish, ScaffoldContext, SectionRenderer};
use crate::error::Result;
use crate::routes::ActionBucket;
use askama::Template;

/// Section sources for one bucket
#[derive(Debug, Clone, Copy)]
pub struct BehaviorSpecSections {
    pub hooks: &'static [&'static str],
    pub data: &'static [&'static str],
    pub scenarios: &'static [&'static str],
    pub shared_examples: &'static [&'static str],
}

const HOOKS: &[&str] = &[r##"before(:each) do
  # Setup test data and authentication if needed
  # Example: sign_in create(:user) if authentication required
end

after(:each) do
  # Cleanup after each test
  # Example: Capybara.reset_sessions!
end"##];

const MEMBER_RECORD: &[&str] = &["let(:{{ singular_key }}) { create(:{{ singular_key }}) }"];

const SHARED_EXAMPLES: &[&str] = &[r##"shared_examples "a properly rendered page" do
  it "has the correct page title" do
    expect(page_object).to have_correct_title
  end

  it "loads without errors" do
    expect(page_object).to be_loaded
    expect(page).not_to have_content("Error")
  end

  it "has proper navigation" do
    expect(page_object.navigation).to be_present
  end
end

describe "page rendering" do
  before { page_object.visit_page }
  it_behaves_like "a properly rendered page"
end"##];

const INDEX: BehaviorSpecSections = BehaviorSpecSections {
    hooks: HOOKS,
    data: &[],
    scenarios: &[r##"describe "visiting the {{ plural_phrase }} index page" do
  context "when there are no {{ plural_phrase }}" do
    it "displays an empty state message" do
      page_object.visit_page

      expect(page_object).to be_loaded
      expect(page_object).to have_correct_title
      # Add specific assertions for empty state
    end
  end

  context "when there are {{ plural_phrase }}" do
    before do
      create_list(:{{ singular_key }}, 3)
    end

    it "displays the list of {{ plural_phrase }}" do
      page_object.visit_page

      expect(page_object).to be_loaded
      expect(page_object).to have_items
      expect(page_object.list_items.count).to eq(3)
    end

    it "allows searching through {{ plural_phrase }}" do
      create(:{{ singular_key }}, name: "Searchable Item")
      page_object.visit_page

      page_object.search_for("Searchable")

      expect(page_object).to have_text("Searchable Item")
    end
  end

  context "when there are more {{ plural_phrase }} than fit on one page" do
    before do
      create_list(:{{ singular_key }}, 25)
    end

    it "shows pagination controls" do
      page_object.visit_page

      expect(page_object).to have_pagination
    end
  end
end"##],
    shared_examples: SHARED_EXAMPLES,
};

const SHOW: BehaviorSpecSections = BehaviorSpecSections {
    hooks: HOOKS,
    data: MEMBER_RECORD,
    scenarios: &[r##"describe "viewing a {{ singular_phrase }}" do
  it "displays the {{ singular_phrase }} details" do
    page_object.visit_page

    expect(page_object).to be_loaded
    expect(page_object).to have_correct_title
    # Add specific assertions for the show page
  end

  it "provides navigation options" do
    page_object.visit_page

    expect(page_object).to have_edit_link
    # Add other navigation assertions
  end

  it "navigates to the edit form" do
    page_object.visit_page
    page_object.click_edit

    expect(current_path).to include("edit")
  end

  it "allows taking screenshots for documentation", :screenshot do
    page_object.visit_page
    page_object.take_screenshot("{{ route_key }}_{{ action }}")
  end
end"##],
    shared_examples: SHARED_EXAMPLES,
};

const NEW: BehaviorSpecSections = BehaviorSpecSections {
    hooks: HOOKS,
    data: &[],
    scenarios: &[r##"describe "creating a new {{ singular_phrase }}" do
  it "displays the new {{ singular_phrase }} form" do
    page_object.visit_page

    expect(page_object).to be_loaded
    expect(page_object).to have_correct_title
    expect(page_object.form).to be_present
  end

  it "allows canceling the creation" do
    page_object.visit_page
    page_object.cancel

    # Assert navigation back to appropriate page
    expect(current_path).not_to eq(page_object.class.path)
  end
end"##],
    shared_examples: SHARED_EXAMPLES,
};

const CREATE: BehaviorSpecSections = BehaviorSpecSections {
    hooks: HOOKS,
    data: &[],
    scenarios: &[r##"describe "creating a {{ singular_phrase }}" do
  it "successfully creates a new {{ singular_phrase }} with valid data" do
    page_object.visit_page

    valid_attributes = attributes_for(:{{ singular_key }})
    page_object.fill_form(valid_attributes)
    page_object.submit_form

    expect(page_object).to have_flash_message(:success)
    # Add assertions for successful creation
  end

  it "displays errors with invalid data" do
    page_object.visit_page

    page_object.fill_form({}) # Empty form
    page_object.submit_form

    expect(page_object).to have_flash_message(:error)
    # Add assertions for validation errors
  end

  it "reports missing required fields" do
    page_object.visit_page
    page_object.submit_form

    expect(page_object).to have_validation_errors
    expect(page).to have_content("can't be blank")
  end
end"##],
    shared_examples: SHARED_EXAMPLES,
};

const EDIT: BehaviorSpecSections = BehaviorSpecSections {
    hooks: HOOKS,
    data: MEMBER_RECORD,
    scenarios: &[r##"describe "editing a {{ singular_phrase }}" do
  it "displays the edit form with current values" do
    page_object.visit_page

    expect(page_object).to be_loaded
    expect(page_object).to have_correct_title
    expect(page_object.form).to be_present
  end

  it "allows canceling the edit" do
    page_object.visit_page
    page_object.cancel

    # Assert navigation back to show page or index
    expect(current_path).not_to eq(page_object.class.path)
  end
end"##],
    shared_examples: SHARED_EXAMPLES,
};

const UPDATE: BehaviorSpecSections = BehaviorSpecSections {
    hooks: HOOKS,
    data: MEMBER_RECORD,
    scenarios: &[r##"describe "updating a {{ singular_phrase }}" do
  it "successfully updates with valid data" do
    page_object.visit_page

    updated_attributes = { name: "Updated Name" }
    page_object.update_form(updated_attributes)
    page_object.submit_form

    expect(page_object).to have_flash_message(:success)
    # Add assertions for successful update
  end

  it "displays errors with invalid data" do
    page_object.visit_page

    page_object.update_form({ name: "" }) # Invalid data
    page_object.submit_form

    expect(page_object).to have_flash_message(:error)
    # Add assertions for validation errors
  end
end"##],
    shared_examples: SHARED_EXAMPLES,
};

const DESTROY: BehaviorSpecSections = BehaviorSpecSections {
    hooks: HOOKS,
    data: MEMBER_RECORD,
    scenarios: &[
        r##"describe "deleting a {{ singular_phrase }}" do
  it "successfully deletes the {{ singular_phrase }}" do
    page_object.visit_page

    expect {
      page_object.click_delete
      # Handle confirmation dialog if present
      page_object.confirm_deletion
    }.to change({{ model }}, :count).by(-1)

    expect(page_object).to have_flash_message(:success)
  end

  it "keeps the {{ singular_phrase }} when deletion is canceled" do
    page_object.visit_page

    expect {
      page_object.click_delete
      page_object.cancel_deletion
    }.not_to change({{ model }}, :count)

    expect(page_object).to be_current_page
  end
end"##,
    ],
    shared_examples: SHARED_EXAMPLES,
};

const OTHER: BehaviorSpecSections = BehaviorSpecSections {
    hooks: HOOKS,
    data: &[],
    scenarios: &[r##"describe "{{ action }} action" do
  it "loads the page successfully" do
    page_object.visit_page

    expect(page_object).to be_loaded
    expect(page_object).to have_correct_title
  end

  it "displays the correct content" do
    page_object.visit_page

    # Add specific assertions for this action
    expect(page).to have_content("{{ controller_title }}")
  end

  it "maintains proper navigation" do
    page_object.visit_page

    expect(page_object.navigation).to be_present
  end
end"##],
    shared_examples: SHARED_EXAMPLES,
};

/// Behavior-spec registry
pub fn sections(bucket: ActionBucket) -> BehaviorSpecSections {
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
#[template(path = "behavior_spec.rb.txt", escape = "none")]
struct BehaviorSpecTemplate<'a> {
    require_path: &'a str,
    controller_title: &'a str,
    action_title: &'a str,
    page_class: &'a str,
    hooks: String,
    data: String,
    scenarios: String,
    shared_examples: String,
}

/// Full spec file; `require_path` loads the page object relative to the spec
pub fn render(
    renderer: &SectionRenderer,
    ctx: &ScaffoldContext,
    bucket: ActionBucket,
    require_path: &str,
) -> Result<String> {
    let s = sections(bucket);
    let template = BehaviorSpecTemplate {
        require_path,
        controller_title: &ctx.controller_title,
        action_title: &ctx.action_title,
        page_class: &ctx.page_class,
        hooks: renderer.render_section(s.hooks, ctx, "\n\n", 2)?,
        data: renderer.render_section(s.data, ctx, "\n", 2)?,
        scenarios: renderer.render_section(s.scenarios, ctx, "\n\n", 2)?,
        shared_examples: renderer.render_section(s.shared_examples, ctx, "\n\n", 2)?,
    };
    Ok(finish(template.render()?))
}
