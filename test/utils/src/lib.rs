pub fn sales_reps_fixture() -> &'static str {
    return r#"
{
  "salesReps": [
    {
      "id": "1",
      "name": "Alice",
      "role": "Senior Sales Executive",
      "region": "North America",
      "skills": ["Negotiation", "CRM"],
      "deals": [
        { "client": "Acme Corp", "value": 120000, "status": "Closed Won" },
        { "client": "Globex", "value": 50000, "status": "In Progress" },
        { "client": "Initech", "value": 15000.5, "status": "Closed Lost" }
      ],
      "clients": [
        {
          "id": 101,
          "name": "Acme Corp",
          "industry": "Manufacturing",
          "contact": { "email": "buyer@acme.test", "phone": "555-0100" }
        }
      ]
    },
    {
      "id": "2",
      "name": "Bob",
      "role": "Account Manager",
      "skills": []
    }
  ]
}
"#
    .trim();
}

pub fn answer_fixture() -> &'static str {
    return r#"
## Quarter summary

Three deals **closed** this quarter:

1.   Acme Corp

2)  Globex
3.Initech

- Top rep: *Alice*
- Pipeline is `healthy`

```rust
fn total() -> u32 {
    3
}
```
"#
    .trim();
}
