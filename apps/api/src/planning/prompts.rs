// Prompt constants for remote plan generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for plan generation.
pub const PLAN_SYSTEM: &str = "You are an expert Indian chef and nutritionist who creates \
    practical, personalized weekly meal plans. You understand regional Indian cuisines, \
    traditional cooking methods and nutritional balance.";

/// Plan prompt template. Placeholders are replaced by `build_plan_prompt`.
pub const PLAN_PROMPT_TEMPLATE: &str = r#"Create a 7-day meal plan for this household.

Request:
{request_json}

Preferences:
- Pantry (as written by the user): {pantry_text}
- Cuisine: {cuisine}
- Family size: {family_size}
- Spice level: {spice_level}/5 (1 = mild, 5 = very spicy)
- Time budget per meal: {time_constraint}
- Diet type: {diet_type}

{pantry_instruction}

Return a JSON object with this EXACT schema:
{
  "days": [
    {
      "day": "Monday",
      "meals": [
        {
          "name": "Dish name",
          "recipe": "One-line description",
          "ingredients": ["wheat flour (2 cups)", "potato (2)"],
          "instructions": ["Step 1", "Step 2"],
          "time": "30 mins",
          "spice": 2,
          "nutrition": {"calories": 300, "protein": "15g", "carbs": "45g", "fats": "10g"},
          "tips": ["One practical cooking tip"]
        }
      ]
    }
  ],
  "grocery_list": [
    {"item": "Tomatoes", "quantity": 6, "unit": "pcs", "alternatives": ["Cherry tomatoes"], "aisle": "Vegetables", "estimated_cost": 50}
  ],
  "nutrition_summary": {
    "daily": [
      {"day": "Monday", "calories": 2100, "protein_g": 60, "carbs_g": 300, "fat_g": 70}
    ]
  },
  "ai_insights": {
    "nutritional_balance": "One or two sentences on the week's balance",
    "variety_score": 4.5,
    "suggestions": ["Short suggestion"]
  }
}

Rules:
- Exactly 7 days, in order: Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday.
- Exactly 3 meals per day, in order: breakfast, lunch, dinner.
- Every meal has a non-empty name, ingredients and instructions.
- "spice" is an integer from 1 to {spice_level}.
- "estimated_cost" is a whole number of Indian rupees.
- Respect the diet type strictly.

{json_only}"#;
