mod confirmation;
mod creditmemo;
mod mocks;
